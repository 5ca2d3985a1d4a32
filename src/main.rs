use code_review::cli::{self, Command, ReviewMode, USAGE};
use std::process::exit;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match cli::parse_cli_args() {
        Ok(Command::Review(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            exit(0);
        }
        Err(e) => {
            eprintln!("{}", cli::usage_error_line(&e));
            exit(1);
        }
    };

    match code_review::run(&args).await {
        Ok(report) => {
            let what = match args.mode {
                ReviewMode::Single => "Code review",
                ReviewMode::MultiAgent => "Multi-agent review",
            };
            println!("{what} complete. See {}", report.display());
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit(1);
        }
    }
}
