use anyhow::bail;

use crate::api::{ApiClient, NewWord, WordEntry, WordUpdate};
use crate::cli::{WordFieldUpdates, WordFields, WordsCommand};

pub async fn run(client: &ApiClient, command: WordsCommand) -> anyhow::Result<()> {
    match command {
        WordsCommand::List => {
            let words = client.list_words().await?;
            if words.is_empty() {
                println!("No words yet. Add one with `vocab-review words add <WORD> <MEANING>`.");
            }
            for entry in &words {
                println!("{}", format_entry(entry));
            }
        }
        WordsCommand::Add(fields) => {
            let word = new_word(fields);
            client.add_word(&word).await?;
            println!("Added '{}'.", word.word);
        }
        WordsCommand::Update { id, fields } => {
            let update = word_update(fields);
            if update.is_empty() {
                bail!("nothing to update, pass at least one field");
            }
            client.update_word(&id, &update).await?;
            println!("Updated {id}.");
        }
        WordsCommand::Delete { ids } => {
            if let [id] = ids.as_slice() {
                client.delete_word(id).await?;
            } else {
                client.batch_delete_words(&ids).await?;
            }
            println!("Deleted {} word(s).", ids.len());
        }
        WordsCommand::Stats => {
            let stats = client.word_stats().await?;
            println!(
                "Today: {} to review, {} reviewed, {} added ({}% done)",
                stats.today_review,
                stats.today_reviewed,
                stats.today_added,
                stats.completion_percent()
            );
        }
    }
    Ok(())
}

fn new_word(fields: WordFields) -> NewWord {
    NewWord {
        word: fields.word.trim().to_string(),
        phonetic: fields.phonetic,
        part_of_speech: fields.part_of_speech,
        meaning: fields.meaning.trim().to_string(),
        example: fields.example,
        category: fields.category,
    }
}

fn word_update(fields: WordFieldUpdates) -> WordUpdate {
    let non_empty = |tags: Vec<String>| (!tags.is_empty()).then_some(tags);
    WordUpdate {
        word: fields.word,
        phonetic: fields.phonetic,
        part_of_speech: non_empty(fields.part_of_speech),
        meaning: fields.meaning,
        example: fields.example,
        category: non_empty(fields.category),
    }
}

fn format_entry(entry: &WordEntry) -> String {
    let mut line = format!("{}  {}", entry.id, entry.word);
    if let Some(phonetic) = &entry.phonetic {
        line.push_str(&format!(" {phonetic}"));
    }
    if !entry.part_of_speech.is_empty() {
        line.push_str(&format!("  {}", entry.part_of_speech.join(" ")));
    }
    line.push_str(&format!("  {}", entry.meaning));
    if !entry.category.is_empty() {
        line.push_str(&format!("  [{}]", entry.category.join(", ")));
    }
    line
}
