pub mod args;
mod presenter;
mod report;

use std::{sync::Arc, time::Duration};

use alloy::{
    primitives::utils::parse_ether,
    providers::{Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::layers::{RetryBackoffLayer, ThrottleLayer},
};
use anyhow::Context;
use args::{Cli, Commands};
use bera_txn::{
    Chain,
    collab::{self, MemoryHistory},
    coordinator::TxnCoordinator,
    options::TxnOptions,
    primitive::{ProviderSender, ProviderWriter},
    state::LifecycleState,
    types::{ContractWrite, ValueSend},
};
use tokio_util::sync::CancellationToken;

enum Request {
    Write(ContractWrite),
    Fund(ValueSend),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = if let Some(throttle) = cli.rpc_throttle {
        RpcClient::builder()
            .layer(ThrottleLayer::new(throttle))
            .layer(RetryBackoffLayer::new(10, 100, 200))
            .connect(&cli.rpc)
            .await
            .context("connecting to RPC")?
    } else {
        RpcClient::builder()
            .layer(RetryBackoffLayer::new(10, 100, 200))
            .connect(&cli.rpc)
            .await
            .context("connecting to RPC")?
    };
    client.set_poll_interval(Duration::from_millis(250));
    let provider = ProviderBuilder::new().connect_client(client);

    let chain_id = provider.get_chain_id().await.context("fetching chain ID")?;
    let chain = match &cli.explorer {
        Some(url) => Chain::custom(chain_id, "Explorer", url.as_str()),
        None if chain_id == Chain::mainnet().chain_id() => Chain::mainnet(),
        None if chain_id == Chain::testnet().chain_id() => Chain::testnet(),
        None => Chain::custom(chain_id, "Explorer", ""),
    };

    let request = match &cli.command {
        Commands::Send { from, to, value } => Request::Fund(
            ValueSend::ether(*to, value)
                .context("parsing value")?
                .with_from(*from),
        ),
        Commands::Call { from, to, data, value, gas } => {
            let mut write = ContractWrite::from_hex(*to, data)
                .context("parsing calldata")?
                .with_from(*from);
            if let Some(value) = value {
                write = write.with_value(parse_ether(value).context("parsing value")?);
            }
            if let Some(gas) = gas {
                write = write.with_gas(*gas);
            }
            Request::Write(write)
        },
    };

    let mut options = TxnOptions::new(cli.message.clone())
        .disable_toast(cli.no_toast)
        .disable_modal(cli.no_modal);
    if let Some(action_type) = cli.action_type {
        options = options.with_action_type(action_type);
    }

    let history = Arc::new(MemoryHistory::new());
    let coordinator = TxnCoordinator::new(
        chain.clone(),
        options,
        ProviderWriter::new(provider.clone()),
        ProviderSender::new(provider),
    )
    .with_presenter(Arc::new(presenter::TerminalPresenter::new(chain, cli.json)))
    .with_history(history.clone())
    .with_analytics(Arc::new(collab::Tracing))
    .with_reporter(Arc::new(collab::Tracing));

    let cancellation_signal = CancellationToken::new();
    let cancellation_token = cancellation_signal.child_token();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
        cancellation_signal.cancel();
    });

    let session = tokio::select! {
        session = async {
            match request {
                Request::Write(write) => coordinator.write(write).await,
                Request::Fund(send) => coordinator.fund_write(send).await,
            }
        } => session,
        _ = cancellation_token.cancelled() => {
            return Err(anyhow::anyhow!("interrupted before the transaction finished"));
        },
    };

    report::render(&coordinator, &session, &history, cli.json)?;

    match session.state() {
        LifecycleState::Error { failure } => {
            Err(anyhow::anyhow!("transaction failed: {}", failure.message))
        },
        _ => Ok(()),
    }
}
