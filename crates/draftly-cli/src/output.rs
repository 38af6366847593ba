//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use draftly_core::Document;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// One row of the document listing, with the share URL when public
pub struct DocumentListing {
    pub document: Document,
    pub share_url: Option<String>,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single document
    pub fn print_document(&self, doc: &Document) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", doc.id);
                println!("Title:   {}", doc.title);
                println!("Slug:    {}", doc.slug);
                println!("Status:  {}", doc.status);
                println!("Created: {}", doc.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", doc.updated_at.format("%Y-%m-%d %H:%M"));
                if !doc.body.is_empty() {
                    println!();
                    println!("{}", doc.body);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(doc).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", doc.id);
            }
        }
    }

    /// Print the document listing
    pub fn print_listings(&self, listings: &[DocumentListing]) {
        match self.format {
            OutputFormat::Human => {
                if listings.is_empty() {
                    println!("No documents found.");
                    return;
                }
                for listing in listings {
                    let doc = &listing.document;
                    let shared = match &listing.share_url {
                        Some(url) => format!(" | public: {}", url),
                        None => String::new(),
                    };
                    println!(
                        "{} | {:<9} | {}{}",
                        &doc.id.to_string()[..8],
                        doc.status.to_string(),
                        truncate(&doc.title, 40),
                        shared
                    );
                }
                println!("\n{} document(s)", listings.len());
            }
            OutputFormat::Json => {
                let rows: Vec<_> = listings
                    .iter()
                    .map(|listing| {
                        serde_json::json!({
                            "document": listing.document,
                            "share_url": listing.share_url,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows).unwrap());
            }
            OutputFormat::Quiet => {
                for listing in listings {
                    println!("{}", listing.document.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
