//! A mock vault: balances and the collected-fee counter live in the same
//! `Context`, under tags private to this fixture.

use formulator_runtime::{Context, ProcessError, Vault};
use formulator_shared::{Address, Amount, Decode, Encode};

const TAG_BALANCE: u8 = 0xe0;
const TAG_COLLECTED_FEE: u8 = 0xe1;

fn read_amount(bytes: &[u8]) -> Amount {
    if bytes.is_empty() {
        Amount::ZERO
    } else {
        Amount::decode_exact(bytes).expect("mock vault storage corrupt")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockVault;

impl MockVault {
    pub fn new() -> Self {
        MockVault
    }

    pub fn balance(&self, ctx: &dyn Context, addr: Address) -> Amount {
        read_amount(&ctx.account_data(addr, &[TAG_BALANCE]))
    }

    /// Directly sets a starting balance for fixture setup, bypassing the
    /// `Vault` trait's add/sub pair.
    pub fn set_balance(&self, ctx: &mut dyn Context, addr: Address, amount: Amount) {
        ctx.set_account_data(addr, &[TAG_BALANCE], amount.encode_to_vec());
    }

    pub fn set_collected_fee(&self, ctx: &mut dyn Context, amount: Amount) {
        ctx.set_process_data(&[TAG_COLLECTED_FEE], amount.encode_to_vec());
    }
}

impl Vault for MockVault {
    fn add_balance(
        &self,
        ctx: &mut dyn Context,
        addr: Address,
        amount: Amount,
    ) -> Result<(), ProcessError> {
        let current = self.balance(ctx, addr);
        let updated = current
            .add(amount)
            .map_err(|e| formulator_runtime::process_error!(vault, "balance overflow: {e}"))?;
        ctx.set_account_data(addr, &[TAG_BALANCE], updated.encode_to_vec());
        Ok(())
    }

    fn sub_balance(
        &self,
        ctx: &mut dyn Context,
        addr: Address,
        amount: Amount,
    ) -> Result<(), ProcessError> {
        let current = self.balance(ctx, addr);
        let updated = current
            .sub(amount)
            .map_err(|e| formulator_runtime::process_error!(vault, "insufficient balance: {e}"))?;
        ctx.set_account_data(addr, &[TAG_BALANCE], updated.encode_to_vec());
        Ok(())
    }

    fn collected_fee(&self, ctx: &dyn Context) -> Amount {
        read_amount(&ctx.process_data(&[TAG_COLLECTED_FEE]))
    }

    fn sub_collected_fee(&self, ctx: &mut dyn Context, amount: Amount) -> Result<(), ProcessError> {
        let current = self.collected_fee(ctx);
        let updated = current
            .sub(amount)
            .map_err(|e| formulator_runtime::process_error!(vault, "insufficient collected fee: {e}"))?;
        ctx.set_process_data(&[TAG_COLLECTED_FEE], updated.encode_to_vec());
        Ok(())
    }
}
