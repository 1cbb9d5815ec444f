use anyhow::{Context, Result};
use arch_atomics::capability::probe;
use arch_atomics::{fence, litmus, Capability, FencePolicy, MemoryModel};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "arch-atomics workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the backends this build selected, as JSON
    Capabilities,
    /// Run the store-buffering litmus test
    Litmus {
        /// Number of trials
        #[arg(long, default_value_t = 1_000_000)]
        trials: usize,

        /// Fence placed between each thread's store and load
        #[arg(long, value_enum, default_value_t = FenceKind::StoreLoad)]
        fence: FenceKind,
    },
    /// Run the criterion benchmarks
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FenceKind {
    StoreLoad,
    Compiler,
    AfterLock,
}

impl FenceKind {
    fn function(self) -> fn() {
        match self {
            FenceKind::StoreLoad => fence::store_load_fence,
            FenceKind::Compiler => fence::compiler_fence,
            FenceKind::AfterLock => fence::memory_barrier_after_lock,
        }
    }

    /// Whether this fence is supposed to forbid the (0, 0) outcome here.
    fn orders_store_load(self, policy: &FencePolicy) -> bool {
        match self {
            FenceKind::StoreLoad => policy.store_load.is_hardware(),
            FenceKind::Compiler => false,
            FenceKind::AfterLock => policy.after_lock.is_hardware(),
        }
    }
}

#[derive(Serialize)]
struct CapabilityReport {
    capability: Capability,
    memory_model: MemoryModel,
    fence_policy: FencePolicy,
    hardware_cas: bool,
    online_processors: usize,
    sound_fences: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Capabilities => print_capabilities()?,
        Commands::Litmus { trials, fence } => run_litmus(trials, fence)?,
        Commands::Bench { quick } => run_benchmarks(quick)?,
    }

    Ok(())
}

fn print_capabilities() -> Result<()> {
    let capability = Capability::CURRENT;
    let report = CapabilityReport {
        capability,
        memory_model: capability.memory_model(),
        fence_policy: capability.fence_policy(),
        hardware_cas: capability.hardware_cas(),
        online_processors: probe::online_processors(),
        sound_fences: capability.require_sound_fences().is_ok(),
    };

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize capability report")?;
    println!("{json}");
    Ok(())
}

fn run_litmus(trials: usize, kind: FenceKind) -> Result<()> {
    let policy = Capability::CURRENT.fence_policy();
    let start = Instant::now();
    let outcome = litmus::store_buffering(trials, kind.function());

    println!("| ra | rb | count |");
    println!("|---|---|---|");
    for ra in [false, true] {
        for rb in [false, true] {
            println!("| {} | {} | {} |", u8::from(ra), u8::from(rb), outcome.count(ra, rb));
        }
    }
    println!("{} trials in {:.2?}", outcome.trials, start.elapsed());

    if kind.orders_store_load(&policy) && outcome.forbidden() > 0 {
        anyhow::bail!(
            "fence let {} of {} trials observe (0, 0)",
            outcome.forbidden(),
            outcome.trials
        );
    }
    if !kind.orders_store_load(&policy) && outcome.forbidden() > 0 {
        println!("(0, 0) observed: expected for a fence that emits no instruction here");
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running benchmarks...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("bench").arg("--bench").arg("primitives_benchmark");

    // Args for the test runner (Criterion) go after --
    if quick {
        cmd.arg("--");
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run cargo bench")?;
    if !status.success() {
        anyhow::bail!("Benchmarks failed");
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}
