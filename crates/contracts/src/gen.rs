use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        struct PackedUserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;bytes32 accountGasLimits;uint256 preVerificationGas;bytes32 gasFees;bytes paymasterAndData;bytes signature;}
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function getUserOpHash(PackedUserOperation calldata userOp) external view returns (bytes32)
        error FailedOp(uint256 opIndex, string reason)
        error FailedOpWithRevert(uint256 opIndex, string reason, bytes inner)
    ]"#
);

abigen!(
    SimpleAccountFactoryAPI,
    r#"[
        function createAccount(address owner,uint256 salt) external returns (address ret)
        function getAddress(address owner,uint256 salt) external view returns (address)
    ]"#
);

abigen!(
    SimpleAccountAPI,
    r#"[
        function execute(address dest, uint256 value, bytes calldata func) external
        function executeBatch(address[] calldata dest, uint256[] calldata value, bytes[] calldata func) external
    ]"#
);

abigen!(
    TokenAPI,
    r#"[
        function balanceOf(address account) external view returns (uint256)
        function decimals() external view returns (uint8)
        function symbol() external view returns (string)
        function transfer(address to, uint256 amount) external returns (bool)
    ]"#
);
