mod config;

use clap::Parser;
use foundation_testing::{MessageWorkload, WorkloadConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with a `[workload]` table
    #[arg(short, long)]
    config_file: Option<String>,

    /// Capacity of the shared queue
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of producer threads
    #[arg(short, long)]
    producers: Option<usize>,

    /// Number of consumer threads
    #[arg(short = 'n', long)]
    consumers: Option<usize>,

    /// Messages per producer; runs until Ctrl-C when omitted
    #[arg(short, long)]
    messages: Option<usize>,

    /// Log at TRACE instead of INFO
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn workload_config(&self) -> config::ConfigResult<WorkloadConfig> {
        let mut workload = match &self.config_file {
            Some(path) => config::from_path(path)?,
            None => WorkloadConfig::default(),
        };

        if let Some(capacity) = self.capacity {
            workload.capacity = capacity;
        }
        if let Some(producers) = self.producers {
            workload.producers = producers;
        }
        if let Some(consumers) = self.consumers {
            workload.consumers = consumers;
        }
        if self.messages.is_some() {
            workload.messages_per_producer = self.messages;
        }

        Ok(workload)
    }
}

fn main() -> std::result::Result<(), BoxedError> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::INFO })
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let workload = MessageWorkload::new(args.workload_config()?)?;

    let queue = workload.queue().clone();
    ctrlc::set_handler(move || {
        if queue.close() {
            tracing::info!("received interrupt, closing queue");
        }
    })?;

    let report = workload.run();
    println!("{report}");

    Ok(())
}
