use anyhow::bail;

use crate::api::{ApiClient, NewQuote, Quote, QuoteUpdate};
use crate::cli::{QuoteArgs, QuoteCommand};

pub async fn run(client: &ApiClient, args: QuoteArgs) -> anyhow::Result<()> {
    match args.action {
        None if args.all => {
            let quotes = client.list_quotes().await?;
            if quotes.is_empty() {
                println!("No quotes yet.");
            }
            for quote in &quotes {
                println!("{}\n", render_quote(quote));
            }
        }
        None => {
            let quote = client.random_quote().await?;
            println!("{}", render_quote(&quote));
        }
        Some(QuoteCommand::Add {
            content,
            translation,
            author,
            image_url,
        }) => {
            let content = content.trim().to_string();
            if content.is_empty() {
                bail!("quote content must not be empty");
            }
            client
                .add_quote(&NewQuote {
                    content,
                    translation,
                    author,
                    image_url,
                })
                .await?;
            println!("Added quote.");
        }
        Some(QuoteCommand::Update {
            id,
            content,
            translation,
            author,
            image_url,
        }) => {
            let update = QuoteUpdate {
                content,
                translation,
                author,
                image_url,
            };
            if update.is_empty() {
                bail!("nothing to update, pass at least one field");
            }
            client.update_quote(&id, &update).await?;
            println!("Updated {id}.");
        }
        Some(QuoteCommand::Delete { id }) => {
            client.delete_quote(&id).await?;
            println!("Deleted {id}.");
        }
    }
    Ok(())
}

fn render_quote(quote: &Quote) -> String {
    let mut lines = Vec::new();
    if let Some(id) = &quote.id {
        lines.push(format!("[{id}]"));
    }
    lines.push(quote.content.clone());
    if !quote.translation.is_empty() {
        lines.push(quote.translation.clone());
    }
    if !quote.author.is_empty() {
        lines.push(format!("  - {}", quote.author));
    }
    lines.join("\n")
}
