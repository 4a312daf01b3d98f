use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;

mod bank;

/// The size of the channel for processing operations.
const CHANNEL_SIZE: usize = 100;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 2 {
        eprintln!("Usage: {} <operations_csv_file>", args[0]);
        std::process::exit(1);
    }
    let input_file = &args[1];

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut state = bank::State::new(receiver);

    let handle = tokio::spawn(async move {
        state.run().await;
        state
    });

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(input_file)
        .expect("Failed to read CSV file");

    for operation in reader.deserialize().flatten() {
        if let Err(err) = sender.send(operation).await {
            eprintln!("Error sending operation: {err}");
        }
    }

    drop(sender); // Close the sender to signal no more operations will be sent
    let state = handle
        .await
        .expect("Failed to join the state handling task");

    let bank = state.bank();
    let report = bank.generate_report();
    for row in &report {
        println!("{row}");
    }
    for row in &report {
        if let Some(account) = bank.find_account(&row.account_number) {
            println!();
            println!("Transactions for {}:", row.account_number);
            for record in account.transactions() {
                println!("{record}");
            }
        }
    }
}
