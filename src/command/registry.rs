//! Schema registry for the command variants.
//!
//! Everything a consumer needs to render, validate or advertise a command
//! lives in these tables: field order, labels, requiredness, value types,
//! placeholders, defaults and gas guidance. Adding a command variant means
//! adding a row here; the form controller, the resolver tool schema and the
//! presentation surfaces all read the registry instead of hard-coding
//! per-variant knowledge.

use std::collections::BTreeMap;

use super::CommandKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire name, camelCase, shared with the tool schema and agent boundary.
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub value_type: ValueType,
    pub placeholder: &'static str,
    /// Pre-filled draft value; empty means the field starts blank.
    pub default: &'static str,
    /// Parameter description advertised to the language model.
    pub description: &'static str,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
        description: &'static str,
    ) -> Self {
        FieldSpec {
            name,
            label,
            required: true,
            value_type: ValueType::Text,
            placeholder,
            default: "",
            description,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    const fn integer(mut self) -> Self {
        self.value_type = ValueType::Integer;
        self
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}

const GAS_LIMIT: FieldSpec = FieldSpec::new(
    "gasLimit",
    "Gas Limit",
    "e.g., 21000",
    "Optional gas limit for the transaction.",
)
.optional();

const fn purpose(placeholder: &'static str) -> FieldSpec {
    FieldSpec::new(
        "purpose",
        "Purpose",
        placeholder,
        "An optional purpose for the transaction for logging.",
    )
    .optional()
}

const TO: FieldSpec = FieldSpec::new(
    "to",
    "Recipient Address",
    "0x...",
    "The recipient Ethereum address.",
);

const TOKEN_ADDRESS: FieldSpec = FieldSpec::new(
    "tokenAddress",
    "Token Address",
    "0x...",
    "The address of the ERC20 or ERC721 token contract.",
);

const TOKEN_IN: FieldSpec = FieldSpec::new(
    "tokenIn",
    "Token In Address",
    "0x...",
    "The address of the token to swap from.",
);

const AMOUNT_IN: FieldSpec = FieldSpec::new(
    "amountIn",
    "Amount In (in wei)",
    "1000000000000000000",
    "The amount of tokenIn to swap (in wei).",
);

const CREATE_ERC20_TOKEN: &[FieldSpec] = &[
    FieldSpec::new(
        "name",
        "Token Name",
        "My Awesome Token",
        "The name of the new ERC20 token.",
    ),
    FieldSpec::new(
        "symbol",
        "Token Symbol",
        "MAT",
        "The symbol for the new ERC20 token.",
    ),
    FieldSpec::new(
        "initialSupply",
        "Initial Supply (in wei)",
        "1000000000000000000000",
        "The initial supply of the new token (in wei).",
    ),
    FieldSpec::new(
        "decimals",
        "Decimals",
        "18",
        "The number of decimals for the token (default 18).",
    )
    .integer()
    .with_default("18"),
    GAS_LIMIT,
    purpose("Initial token creation for project X"),
];

const MINT_ERC20: &[FieldSpec] = &[
    TOKEN_ADDRESS,
    TO,
    FieldSpec::new(
        "amount",
        "Amount (in wei)",
        "1000000000000000000",
        "The amount of tokens or native currency (in wei).",
    ),
    GAS_LIMIT,
    purpose("Quarterly user rewards"),
];

const MINT_ERC721: &[FieldSpec] = &[
    TOKEN_ADDRESS,
    TO,
    FieldSpec::new(
        "tokenUri",
        "Token URI",
        "ipfs://...",
        "The URI for the ERC721 token metadata.",
    ),
    GAS_LIMIT,
    purpose("Minting achievement NFT"),
];

const TRANSFER_ERC20: &[FieldSpec] = &[
    TOKEN_ADDRESS,
    TO,
    FieldSpec::new(
        "amount",
        "Amount (in wei)",
        "500000000000000000",
        "The amount of tokens or native currency (in wei).",
    ),
    GAS_LIMIT,
    purpose("Payment for services"),
];

const TRANSFER_NATIVE: &[FieldSpec] = &[
    TO,
    FieldSpec::new(
        "amount",
        "Amount (in wei)",
        "10000000000000000",
        "The amount of tokens or native currency (in wei).",
    ),
    GAS_LIMIT,
    purpose("Operational gas fee funding"),
];

const SWAP_TOKENS: &[FieldSpec] = &[
    TOKEN_IN,
    AMOUNT_IN,
    FieldSpec::new(
        "tokenOut",
        "Token Out Address",
        "0x...",
        "The address of the token to swap to.",
    ),
    FieldSpec::new(
        "minOut",
        "Minimum Out (in wei)",
        "0",
        "The minimum amount of tokenOut to receive.",
    )
    .optional()
    .with_default("0"),
    FieldSpec::new(
        "recipient",
        "Recipient Address",
        "0x...",
        "The final recipient of the swapped tokens or ETH.",
    ),
    GAS_LIMIT,
    purpose("Portfolio rebalancing"),
];

const SWAP_TO_ETH_AND_TRANSFER: &[FieldSpec] = &[
    TOKEN_IN,
    AMOUNT_IN,
    FieldSpec::new(
        "minEthOut",
        "Minimum ETH Out (in wei)",
        "0",
        "The minimum amount of ETH to receive.",
    )
    .optional()
    .with_default("0"),
    FieldSpec::new(
        "recipient",
        "Final Recipient Address",
        "0x...",
        "The final recipient of the swapped tokens or ETH.",
    ),
    GAS_LIMIT,
    purpose("Cashing out rewards to ETH"),
];

/// Ordered field list for a command kind.
pub fn fields(kind: CommandKind) -> &'static [FieldSpec] {
    match kind {
        CommandKind::CreateErc20Token => CREATE_ERC20_TOKEN,
        CommandKind::MintErc20 => MINT_ERC20,
        CommandKind::MintErc721 => MINT_ERC721,
        CommandKind::TransferErc20 => TRANSFER_ERC20,
        CommandKind::TransferNative => TRANSFER_NATIVE,
        CommandKind::SwapTokens => SWAP_TOKENS,
        CommandKind::SwapToEthAndTransfer => SWAP_TO_ETH_AND_TRANSFER,
        CommandKind::GetAgentAddress => &[],
    }
}

/// Fresh draft values for a kind: every field present, defaults applied.
pub fn defaults(kind: CommandKind) -> BTreeMap<String, String> {
    fields(kind)
        .iter()
        .map(|spec| (spec.name.to_string(), spec.default.to_string()))
        .collect()
}

pub fn description(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::CreateErc20Token => {
            "Define and deploy a new ERC20 compliant token. The initial supply is \
             minted to the agent's signer address."
        }
        CommandKind::MintErc20 => "Mint additional supply of an existing ERC20 token.",
        CommandKind::MintErc721 => "Mint an ERC721 token with the given metadata URI.",
        CommandKind::TransferErc20 => "Transfer ERC20 tokens from the agent wallet.",
        CommandKind::TransferNative => "Transfer native currency from the agent wallet.",
        CommandKind::SwapTokens => "Execute a token-for-token swap on a decentralized exchange.",
        CommandKind::SwapToEthAndTransfer => {
            "Atomically swap an ERC20 token for native ETH and transfer it to a \
             final recipient in a single transaction."
        }
        CommandKind::GetAgentAddress => {
            "Requires no parameters. Queries the agent for its public wallet address."
        }
    }
}

pub fn gas_hint(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::CreateErc20Token => {
            "Gas for token deployment can be high. A limit of 1,000,000 to 2,000,000 is common."
        }
        CommandKind::MintErc20 | CommandKind::MintErc721 => {
            "Typical gas for minting is ~50,000-150,000, depending on contract complexity."
        }
        CommandKind::TransferErc20 => "Typical gas for an ERC20 transfer is ~45,000-65,000.",
        CommandKind::TransferNative => {
            "A standard native ETH transfer requires a gas limit of 21,000."
        }
        CommandKind::SwapTokens | CommandKind::SwapToEthAndTransfer => {
            "Gas for a DEX swap can be high, often in the 150,000-250,000 range."
        }
        CommandKind::GetAgentAddress => "Gas limit depends on the complexity of the transaction.",
    }
}
