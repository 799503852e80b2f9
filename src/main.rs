// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Crawl the website, printing each link as it is checked
// 3. Print the deduplicated results (table or JSON), optionally write an
//    HTML report
// 4. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use broken_link_checker::crawl::{CrawlOrigin, Crawler, LinkRecord, Progress};
use broken_link_checker::report::{self, Summary};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = could not crawl at all (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let origin = CrawlOrigin::parse(&cli.url)?;
    let crawler = Crawler::new(origin, cli.crawl_config())?;

    // Keep stdout clean for --json; the banner goes to stderr instead
    let banner = format!(
        "🔍 Scanning website: {}\n📊 Max crawl depth: {}",
        crawler.origin().seed,
        cli.depth
    );
    if cli.json {
        eprintln!("{}", banner);
    } else {
        println!("{}", banner);
    }

    // Ctrl-C stops the crawl; what was gathered so far is still reported
    let cancel = crawler.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⏹️  Interrupted, finishing up...");
            cancel.cancel();
        }
    });

    let estimate = if cli.quiet { 1 } else { crawler.estimate_links().await };
    let mut progress = ConsoleProgress {
        checked: 0,
        estimate,
        quiet: cli.quiet,
    };

    let run = crawler.run(&mut progress).await;
    let summary = run.summarize();

    eprintln!(
        "📄 Crawled {} page(s), {} failed, {} probe(s) sent",
        run.stats.pages_fetched, run.stats.pages_failed, run.stats.links_checked
    );

    print_results(&summary, cli.json, cli.quiet)?;

    if let Some(dir) = &cli.report_dir {
        let path = report::write_html_report(&summary, dir)
            .with_context(|| format!("could not write HTML report for {}", summary.origin))?;
        eprintln!("📝 HTML report: {}", path.display());
    }

    Ok(if summary.has_broken() { 1 } else { 0 })
}

// Logs go to stderr so `--json` output on stdout stays machine readable.
// RUST_LOG wins over --verbose when both are given.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Live log of checked links, written to stderr
struct ConsoleProgress {
    checked: usize,
    // Links on the seed page; deeper pages push the count past it
    estimate: usize,
    quiet: bool,
}

impl Progress for ConsoleProgress {
    fn link_checked(&mut self, record: &LinkRecord) {
        self.checked += 1;
        if self.quiet {
            return;
        }
        let total = self.estimate.max(self.checked);
        eprintln!(
            "  [{}/{}] {} {} (Status: {})",
            self.checked,
            total,
            status_marker(record),
            record.url,
            record.status_label()
        );
    }

    fn page_failed(&mut self, record: &LinkRecord) {
        if !self.quiet {
            eprintln!("  {} {} ({})", status_marker(record), record.url, record.note);
        }
    }
}

fn status_marker(record: &LinkRecord) -> &'static str {
    if record.reachable {
        "[OK]"
    } else {
        "[BROKEN]"
    }
}

// Prints the results either as a table or JSON
//
// With --quiet the table only lists broken links; JSON is always complete.
fn print_results(summary: &Summary, json: bool, quiet: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary, quiet);
    }
    Ok(())
}

fn table_rows(summary: &Summary, broken_only: bool) -> Vec<&LinkRecord> {
    if broken_only {
        summary.broken_links().collect()
    } else {
        summary.links.iter().collect()
    }
}

fn result_label(record: &LinkRecord) -> &'static str {
    if record.reachable {
        "✅ OK"
    } else if record.is_page_error() {
        "❌ NO PAGE"
    } else {
        "❌ BROKEN"
    }
}

// Prints results as a human-readable table in the terminal
fn print_table(summary: &Summary, broken_only: bool) {
    println!();
    println!("{:<60} {:<12} {:<8} {:<12}", "URL", "RESULT", "STATUS", "NOTE");
    println!("{}", "=".repeat(95));

    for record in table_rows(summary, broken_only) {
        // URLs are ASCII (percent-encoded / punycode), so byte slicing is safe
        let url_display = if record.url.len() > 57 {
            format!("{}...", &record.url[..57])
        } else {
            record.url.clone()
        };

        println!(
            "{:<60} {:<12} {:<8} {:<12}",
            url_display,
            result_label(record),
            record.status_label(),
            record.note
        );
    }

    println!();
    println!("📊 Summary for {}:", summary.origin);
    println!("   ✅ Working: {}", summary.working);
    println!("   ❌ Broken: {}", summary.broken);
    println!("   📋 Total: {}", summary.total);
}
