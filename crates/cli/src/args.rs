use alloy::primitives::Address;
use bera_txn::types::ActionType;
use clap::{Parser, Subcommand};

pub(crate) const DEFAULT_RPC_PROVIDER: &str = "http://127.0.0.1:8545";

#[derive(Parser, Debug)]
#[command(name = "bera-txn", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// RPC endpoint to connect to
    #[arg(long, global = true, default_value_t = DEFAULT_RPC_PROVIDER.to_string())]
    pub rpc: String,

    /// RPC throttling (req/sec) [default: none]
    #[arg(long, global = true)]
    pub rpc_throttle: Option<u32>,

    /// Block explorer base URL for transaction links [default: known explorer
    /// of the connected chain]
    #[arg(long, global = true)]
    pub explorer: Option<String>,

    /// Message shown in notifications and recorded in history
    #[arg(long, global = true, default_value = "")]
    pub message: String,

    /// Action type recorded in history and analytics (e.g. `swap`, `borrow`)
    #[arg(long, global = true)]
    pub action_type: Option<ActionType>,

    /// Do not print toast notifications
    #[arg(long, global = true, default_value_t = false)]
    pub no_toast: bool,

    /// Do not track modal dialogs
    #[arg(long, global = true, default_value_t = false)]
    pub no_modal: bool,

    /// Print the final report as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transfer native asset
    Send {
        /// Sender account, must be unlocked on the node
        #[arg(long)]
        from: Address,

        /// Recipient address
        #[arg(long)]
        to: Address,

        /// Amount in whole native units (e.g. 1.5)
        #[arg(long)]
        value: String,
    },
    /// Call a contract with raw calldata
    Call {
        /// Sender account, must be unlocked on the node
        #[arg(long)]
        from: Address,

        /// Contract address
        #[arg(long)]
        to: Address,

        /// Hex-encoded calldata
        #[arg(long)]
        data: String,

        /// Native amount to attach, in whole units
        #[arg(long)]
        value: Option<String>,

        /// Gas limit [default: estimated by the node]
        #[arg(long)]
        gas: Option<u64>,
    },
}
