use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee facade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Find employees whose name contains the text
    Search { query: String },
    /// Show one employee
    Get { id: String },
    /// Print the highest salary
    HighestSalary,
    /// Print the ten best paid employee names
    TopEarners,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
        #[arg(long)]
        age: i64,
    },
    /// Delete an employee
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api/employees", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::List => client.get(&base).send().await?,
        Commands::Search { query } => client.get(format!("{}/search/{}", base, query)).send().await?,
        Commands::Get { id } => client.get(format!("{}/{}", base, id)).send().await?,
        Commands::HighestSalary => client.get(format!("{}/highest-salary", base)).send().await?,
        Commands::TopEarners => {
            client
                .get(format!("{}/top-ten-highest-earning-names", base))
                .send()
                .await?
        }
        Commands::Create { name, salary, age } => {
            client
                .post(&base)
                .json(&json!({ "name": name, "salary": salary, "age": age }))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{}/{}", base, id)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: facade returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(ExitCode::from(exit_status(status)));
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(ExitCode::SUCCESS)
}

/// Process exit status for a facade response: 0 on success, 2 for
/// rejected input, 1 for any other failure.
fn exit_status(status: reqwest::StatusCode) -> u8 {
    if status.is_success() {
        0
    } else if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
        2
    } else {
        1
    }
}
