//! Misc utils

use ethers::{
    types::{Address, Bytes, U128, U256},
    utils::to_checksum,
};

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// Converts Option address to checksum
pub fn as_checksum_addr_opt<S>(val: &Option<Address>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if let Some(addr) = val {
        s.serialize_str(&to_checksum(addr, None))
    } else {
        s.serialize_none()
    }
}

/// Splits `paymasterAndData` into paymaster, verification gas, post-op gas and paymaster data
pub fn unpack_paymaster_data(buf: &[u8]) -> (Address, U256, U256, Bytes) {
    if buf.len() >= 52 {
        let (paymaster_verification_gas_limit, paymaster_post_op_gas_limit) =
            unpack_uint128(&buf[20..52]);
        (
            Address::from_slice(&buf[0..20]),
            paymaster_verification_gas_limit,
            paymaster_post_op_gas_limit,
            Bytes::from(buf[52..].to_vec()),
        )
    } else {
        (Address::zero(), U256::zero(), U256::zero(), Bytes::default())
    }
}

/// Builds `paymasterAndData`; empty when there is no paymaster
pub fn pack_paymaster_data(
    addr: Address,
    paymaster_verification_gas_limit: U256,
    paymaster_post_op_gas_limit: U256,
    paymaster_data: &Bytes,
) -> Vec<u8> {
    if addr.is_zero() {
        vec![]
    } else {
        let gas_data = pack_uint128(paymaster_verification_gas_limit, paymaster_post_op_gas_limit);
        [addr.0.to_vec(), gas_data.to_vec(), paymaster_data.to_vec()].concat()
    }
}

/// Builds `initCode`; empty when there is no factory
pub fn pack_factory_data(factory: Address, factory_data: &Bytes) -> Vec<u8> {
    if factory.is_zero() {
        vec![]
    } else {
        [factory.0.to_vec(), factory_data.to_vec()].concat()
    }
}

/// Splits `initCode` into factory and factory data
pub fn unpack_factory_data(init_code: &[u8]) -> (Address, Bytes) {
    if init_code.len() > 20 {
        (Address::from_slice(&init_code[0..20]), Bytes::from(init_code[20..].to_vec()))
    } else {
        (Address::default(), Bytes::default())
    }
}

/// Packs two uint128
pub fn pack_uint128(a: U256, b: U256) -> [u8; 32] {
    let mut res = [0u8; 32];
    let a: U128 = {
        let mut tem = [0; 32];
        a.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    let b: U128 = {
        let mut tem = [0; 32];
        b.to_big_endian(&mut tem);
        U128::from_big_endian(&tem[16..32])
    };
    a.to_big_endian(&mut res[0..16]);
    b.to_big_endian(&mut res[16..32]);
    res
}

/// Unpacks two uint128 from bytes
pub fn unpack_uint128(buf: &[u8]) -> (U256, U256) {
    let mut a = [0u8; 16];
    let mut b = [0u8; 16];
    a.copy_from_slice(&buf[0..16]);
    b.copy_from_slice(&buf[16..32]);
    (U256::from_big_endian(&a), U256::from_big_endian(&b))
}
