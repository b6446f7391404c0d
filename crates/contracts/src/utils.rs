use crate::gen::entry_point_api;
use smartsend_primitives::{
    unpack_factory_data, unpack_paymaster_data, unpack_uint128, PackedUserOperation,
    UserOperation,
};

impl From<PackedUserOperation> for entry_point_api::PackedUserOperation {
    fn from(uo: PackedUserOperation) -> Self {
        Self {
            sender: uo.sender,
            nonce: uo.nonce,
            init_code: uo.init_code,
            call_data: uo.call_data,
            account_gas_limits: uo.account_gas_limits.0,
            pre_verification_gas: uo.pre_verification_gas,
            gas_fees: uo.gas_fees.0,
            paymaster_and_data: uo.paymaster_and_data,
            signature: uo.signature,
        }
    }
}

impl From<&UserOperation> for entry_point_api::PackedUserOperation {
    fn from(uo: &UserOperation) -> Self {
        uo.pack().into()
    }
}

impl From<entry_point_api::PackedUserOperation> for UserOperation {
    fn from(uo: entry_point_api::PackedUserOperation) -> Self {
        let (verification_gas_limit, call_gas_limit) = unpack_uint128(&uo.account_gas_limits);
        let (max_priority_fee_per_gas, max_fee_per_gas) = unpack_uint128(&uo.gas_fees);

        let mut res = UserOperation::default()
            .sender(uo.sender)
            .nonce(uo.nonce)
            .call_data(uo.call_data)
            .call_gas_limit(call_gas_limit)
            .verification_gas_limit(verification_gas_limit)
            .pre_verification_gas(uo.pre_verification_gas)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .signature(uo.signature);

        let (factory, factory_data) = unpack_factory_data(&uo.init_code);
        if !factory.is_zero() {
            res = res.factory(factory, factory_data);
        }

        let (paymaster, verification_gas_limit, post_op_gas_limit, paymaster_data) =
            unpack_paymaster_data(&uo.paymaster_and_data);
        if !paymaster.is_zero() {
            res =
                res.paymaster(paymaster, verification_gas_limit, post_op_gas_limit, paymaster_data);
        }

        res
    }
}
