//! Example: Export a page with a custom block rule
//!
//! Run with: NOTION_TOKEN=... cargo run -p notionkit --example export_page -- <PAGE_ID|URL>
//!
//! Registers extra rules for dividers and to-do items before exporting, to
//! show how the renderer table can be extended.

use notionkit::{plain_text, Exporter, ExportFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Some(page) = std::env::args().nth(1) else {
        eprintln!("Usage: export_page <PAGE_ID|URL>");
        std::process::exit(1);
    };
    let token = std::env::var("NOTION_TOKEN").unwrap_or_default();

    let mut exporter = match Exporter::builder()
        .token(token)
        .out_dir("out/notion")
        .format(ExportFormat::Markdown)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let renderer = exporter.renderer_mut();
    renderer.register("divider", |_| "---\n".to_string());
    renderer.register("to_do", |block| {
        let checked = block
            .content()
            .and_then(|c| c.get("checked"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let text = block.rich_text().map(plain_text).unwrap_or_default();
        format!("- [{}] {}\n", if checked { "x" } else { " " }, text)
    });

    match exporter.export(&page).await {
        Ok(report) => {
            println!(
                "Wrote {} ({} blocks, {} bytes)",
                report.path.display(),
                report.block_count,
                report.bytes
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
