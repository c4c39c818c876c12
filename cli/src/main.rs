use std::process::ExitCode;

use anyhow::{bail, Context as _};
use metanode_api::prelude::*;
use metanode_client::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let command = std::env::var("COMMAND").context("Missing COMMAND env var")?;
    let output = Output::from_env();
    let session = WalletSession::new(config.account);
    let chain = RpcChain::new(&config);
    let notifier = ConsoleNotifier;
    let ctx = Context::new(&chain, &notifier, &session, config.pool_id);
    info!(%command, pool_id = config.pool_id, connected = session.is_connected(), "starting");

    // Refusals and failures were already shown by the notifier; they only set the exit code.
    let completed = match command.as_str() {
        "position" => log_position(ctx, output).await.map(|()| true)?,
        "rewards" => log_rewards(ctx, output).await.map(|()| true)?,
        "withdrawals" => log_withdrawals(ctx, output).await.map(|()| true)?,
        "stake" => stake(ctx).await?,
        "claim" => claim(ctx).await,
        "unstake" => unstake(ctx).await?,
        "withdraw" => withdraw(ctx).await,
        "watch" => watch(ctx, output, &config).await.map(|()| true)?,
        other => bail!("Unknown COMMAND {other:?}"),
    };
    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

type Ctx<'a> = Context<'a, RpcChain, ConsoleNotifier>;

/// Prints notifications the way the web client shows toasts.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => println!("{}", notification.message),
            Level::Failure => eprintln!("{}", notification.message),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Output {
    Text,
    Json,
}

impl Output {
    fn from_env() -> Self {
        match std::env::var("OUTPUT").as_deref() {
            Ok("json") => Output::Json,
            _ => Output::Text,
        }
    }

    /// Prints `view` as JSON, or hands it to `text` for the plain layout.
    fn print<T: Serialize>(self, view: &T, text: impl FnOnce(&T)) -> Result<(), anyhow::Error> {
        match self {
            Output::Json => println!("{}", serde_json::to_string_pretty(view)?),
            Output::Text => text(view),
        }
        Ok(())
    }
}

fn read_amount() -> Result<String, anyhow::Error> {
    let amount = std::env::var("AMOUNT").context("Missing AMOUNT env var")?;
    Ok(amount.trim().to_string())
}

fn print_stake_view(view: &StakeView) {
    println!("Stake");
    println!("  total_staked: {} {}", view.total_staked, NATIVE_SYMBOL);
    if view.connected {
        println!("  staked_amount: {} {}", view.staked_amount, NATIVE_SYMBOL);
        println!("  pending_reward: {} {}", view.pending_reward, REWARD_SYMBOL);
        println!("  wallet_balance: {} {}", view.wallet_balance, NATIVE_SYMBOL);
    } else {
        println!("  wallet: not connected (set ACCOUNT)");
    }
}

fn print_claim_view(view: &ClaimView) {
    println!("Rewards");
    if !view.connected {
        println!("  wallet: not connected (set ACCOUNT)");
        return;
    }
    println!("  pending_reward: {} {}", view.pending_reward, REWARD_SYMBOL);
    println!("  staked_amount: {} {}", view.staked_amount, NATIVE_SYMBOL);
    println!("  can_claim: {}", view.can_claim);
    println!("  history: not recorded");
}

fn print_withdraw_view(view: &WithdrawView) {
    println!("Withdrawals");
    if !view.connected {
        println!("  wallet: not connected (set ACCOUNT)");
        return;
    }
    println!("  staked_amount: {} {}", view.staked_amount, NATIVE_SYMBOL);
    println!(
        "  available_to_withdraw: {} {}",
        view.available_to_withdraw, NATIVE_SYMBOL
    );
    println!("  pending_withdraw: {} {}", view.pending_withdraw, NATIVE_SYMBOL);
    if !view.request_consistent {
        println!("  warning: contract reports more available than requested");
    }
    println!(
        "  cooldown: {} minutes after an unstake request",
        view.cooldown_minutes
    );
}

async fn log_position(ctx: Ctx<'_>, output: Output) -> Result<(), anyhow::Error> {
    let page = StakePage::new(ctx);
    page.refresh().await;
    output.print(&page.view(), print_stake_view)
}

async fn log_rewards(ctx: Ctx<'_>, output: Output) -> Result<(), anyhow::Error> {
    let page = ClaimPage::new(ctx);
    page.refresh().await;
    output.print(&page.view(), print_claim_view)
}

async fn log_withdrawals(ctx: Ctx<'_>, output: Output) -> Result<(), anyhow::Error> {
    let page = WithdrawPage::new(ctx);
    page.refresh().await;
    output.print(&page.view(), print_withdraw_view)
}

async fn stake(ctx: Ctx<'_>) -> Result<bool, anyhow::Error> {
    let page = StakePage::new(ctx);
    if !page.amount().set(&read_amount()?) {
        return Ok(refuse_amount(ctx.notifier));
    }
    page.refresh().await;
    Ok(report(page.stake().await))
}

async fn claim(ctx: Ctx<'_>) -> bool {
    let page = ClaimPage::new(ctx);
    page.refresh().await;
    report(page.claim().await)
}

async fn unstake(ctx: Ctx<'_>) -> Result<bool, anyhow::Error> {
    let page = WithdrawPage::new(ctx);
    if !page.amount().set(&read_amount()?) {
        return Ok(refuse_amount(ctx.notifier));
    }
    page.refresh().await;
    Ok(report(page.unstake().await))
}

async fn withdraw(ctx: Ctx<'_>) -> bool {
    let page = WithdrawPage::new(ctx);
    page.refresh().await;
    report(page.withdraw().await)
}

/// An `AMOUNT` the input field would not accept at all.
fn refuse_amount<N: Notifier>(notifier: &N) -> bool {
    notifier.notify(Notification::failure(
        ActionError::InvalidAmount(AmountError::Empty).to_string(),
    ));
    false
}

/// Prints the hash of a confirmed transaction. Returns whether the action completed.
fn report(result: Result<TxOutcome, ActionError>) -> bool {
    match result {
        Ok(TxOutcome::Confirmed(hash)) => {
            println!("  transaction: {hash}");
            true
        }
        Ok(TxOutcome::Failed(_)) | Err(_) => false,
    }
}

/// Re-renders the Stake page every poll tick until Ctrl-C.
async fn watch(ctx: Ctx<'_>, output: Output, config: &ClientConfig) -> Result<(), anyhow::Error> {
    let page = StakePage::new(ctx);
    let mut schedule = RefreshSchedule::new(config.poll_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = schedule.tick() => {
                page.refresh().await;
                output.print(&page.view(), print_stake_view)?;
            }
            result = &mut shutdown => {
                result?;
                info!("shutting down");
                return Ok(());
            }
        }
    }
}
