//! Browse command implementation

use anyhow::Result;
use folio_core::{Catalog, RenderFrame, SortKey, ViewQuery};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// What to load and how to show it
pub struct BrowseOptions {
    pub pages: u32,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub json: bool,
}

/// Load pages 1..=N into a catalog, then print the requested view.
///
/// A page that fails to load is logged and skipped; whatever did load is
/// still shown.
pub async fn browse(api_url: &str, timeout_secs: u64, options: BrowseOptions) -> Result<()> {
    let source = super::http_source(api_url, timeout_secs)?;
    let catalog = Catalog::new(Arc::new(source));

    let progress = ProgressBar::new(options.pages as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg}")?
            .progress_chars("##-"),
    );

    let mut failed = 0u32;
    for n in 1..=options.pages {
        let result = if n == 1 {
            catalog.load_current_page().await
        } else {
            catalog.load_next_page().await
        };

        match result {
            Ok(outcome) => progress.set_message(format!("{} books", outcome.total)),
            Err(e) => {
                failed += 1;
                tracing::error!("Skipping page {}: {}", e.page, e.error);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    catalog
        .set_query(ViewQuery {
            search: options.search,
            sort: options.sort,
        })
        .await;
    let frame = catalog.frame().await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print_frame(&frame);
        if failed > 0 {
            println!("({} of {} pages failed to load)", failed, options.pages);
        }
    }

    Ok(())
}

fn print_frame(frame: &RenderFrame) {
    for record in &frame.records {
        println!("{}", record.title);
        println!("  Author:         {}", record.authors);
        println!("  Publisher:      {}", record.publisher);
        println!("  Published Date: {}", record.published_date);
        if let Some(link) = &record.link {
            println!("  Link:           {}", link);
        }
    }
    println!("\nShowing {} of {} books", frame.count, frame.total);
}
