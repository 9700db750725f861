use boj_tool::app::render;
use boj_tool::config::paths;
use boj_tool::utils::logger::{self, Verbosity};
use boj_tool::utils::style::Painter;
use boj_tool::utils::validation::{self, Validate};
use boj_tool::{
    BojConfig, BojError, BojTool, CliConfig, Command, HttpJudgeClient, LocalSessionStore,
    StdinCredentials, SubmitOptions,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    let verbosity = Verbosity::from_flags(cli.verbose, cli.debug);
    if cli.log_json {
        logger::init_json_logger(verbosity);
    } else {
        logger::init_cli_logger(verbosity);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Command::Version = cli.command {
        println!("{}", render::version_banner());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: CliConfig) -> boj_tool::Result<()> {
    let config = BojConfig::load(
        cli.config.as_deref(),
        paths::default_config_path().as_deref(),
    )?;
    config.validate()?;

    let session_path = cli
        .session_file
        .clone()
        .or_else(paths::default_session_path)
        .ok_or_else(|| BojError::ConfigError {
            message: "Cannot determine a data directory; pass --session-file".to_string(),
        })?;
    validation::validate_path("session_file", &session_path.to_string_lossy())?;

    let client = HttpJudgeClient::new(&config)?;
    let store = LocalSessionStore::new(session_path);
    let tool = BojTool::new(client, store, StdinCredentials::new(), config);
    let painter = Painter::for_stdout();

    match cli.command {
        Command::Login => {
            let username = tool.login().await?;
            println!("Logged in as {}", username);
        }
        Command::Logout => {
            if tool.logout().await? {
                println!("Logged out");
            } else {
                println!("No saved session");
            }
        }
        Command::Submit {
            number,
            filename,
            language_code,
            code_open,
            no_wait,
        } => {
            let options = SubmitOptions {
                language_code,
                code_open,
            };
            let receipt = tool.submit(number, &filename, &options).await?;
            tracing::info!(
                "✅ Submitted {} ({} bytes) as {}",
                filename.display(),
                receipt.source_bytes,
                receipt.username
            );

            if no_wait {
                println!("Submitted problem {}", receipt.problem_id);
                return Ok(());
            }

            let mut status_line = render::StatusLine::new(painter);
            let mut render_error = None;
            let result = tool
                .wait_for_verdict(&receipt, |status| {
                    if let Err(e) = status_line.update(status) {
                        render_error.get_or_insert(e);
                    }
                })
                .await;
            println!();

            if let Some(e) = render_error {
                return Err(e.into());
            }
            result?;
        }
        Command::Stats { user } => {
            let stats = tool.stats(user.as_deref()).await?;
            println!("{}", render::stats_report(&painter, &stats));
        }
        Command::Version => println!("{}", render::version_banner()),
    }

    Ok(())
}
