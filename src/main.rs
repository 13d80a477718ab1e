//! Quicktag - expand markup abbreviations from the command line.
//!
//! # Usage
//!
//! ```bash
//! echo 'ul.list/li' | quicktag
//! quicktag page.html --cursor 120 --print-caret
//! quicktag --trigger ctrl-space --save
//! ```

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use quicktag::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags, TriggerKey,
};
use quicktag::editor::EditorBuffer;
use quicktag::perf;
use quicktag::trigger::{KeyOutcome, TriggerHandler};

/// Expand the markup abbreviation before the cursor
#[derive(Parser, Debug)]
#[command(name = "quicktag", version, about, long_about = None)]
struct Cli {
    /// Document to edit (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Cursor position as a char offset (default: end of content)
    #[arg(long, value_name = "OFFSET")]
    cursor: Option<usize>,

    /// Key pressed to fire the expansion
    #[arg(long, value_enum, default_value = "tab")]
    trigger: TriggerKey,

    /// Print the final cursor offset to stderr
    #[arg(long)]
    print_caret: bool,

    /// Enable timing output
    #[arg(long)]
    perf: bool,

    /// Write resolve/expand/commit events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_document(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }
    if (cli.save || cli.clear) && cli.file.is_none() {
        return Ok(ExitCode::SUCCESS);
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("QUICKTAG_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        tracing::warn!(
            path = ?debug_log_path,
            %err,
            "failed to initialize debug log"
        );
    }

    let text = read_document(cli.file.as_ref())?;
    let mut buffer = EditorBuffer::from_text(&text);
    match cli.cursor {
        Some(offset) if offset > buffer.len_chars() => {
            anyhow::bail!(
                "Cursor {offset} is past the end of the document ({} chars)",
                buffer.len_chars()
            );
        }
        Some(offset) => buffer.move_to_offset(offset),
        None => buffer.move_to_content_end(),
    }

    let trigger = effective.trigger.unwrap_or(cli.trigger);
    let handler = TriggerHandler::new(trigger);
    let outcome = {
        let _scope = perf::scope("trigger");
        handler
            .handle_key(&trigger.key_event(), &mut buffer)
            .context("Failed to apply expansion")?
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(buffer.text().as_bytes())?;
    stdout.flush()?;

    if effective.print_caret {
        eprintln!("{}", buffer.cursor_offset());
    }

    Ok(match outcome {
        KeyOutcome::Handled => ExitCode::SUCCESS,
        KeyOutcome::PassThrough => ExitCode::FAILURE,
    })
}
