use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::{AnswerService, Message, ModelInvoker};
use crate::core::AppConfig;
use crate::core::db::{async_db, initialize};
use crate::gemini::GeminiClient;
use crate::search::{FastEmbedder, VectorIndex};

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let db = async_db(&config.vec_db_path).await?;
    initialize(&db).await?;
    let index = Arc::new(VectorIndex::new(db, Arc::new(FastEmbedder::new()?)));
    let client = Arc::new(GeminiClient::new(&config.genai_base_url));
    let invoker = ModelInvoker::new(config.model_candidates, config.retry_policy);
    let service =
        AnswerService::new(index, client, invoker, config.genai_api_key).with_top_k(config.top_k);

    let mut history: Vec<Message> = vec![];

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                history.push(Message::user(&line));
                match service.answer(&history).await {
                    Ok(answer) => {
                        println!("{}", answer.message);
                        let sources: Vec<&str> =
                            answer.sources.iter().flatten().map(|s| s.as_str()).collect();
                        if !sources.is_empty() {
                            println!("\nSources: {}", sources.join(", "));
                        }
                        history.push(Message::new("assistant", &answer.message));
                    }
                    // Keep the session going, the next question may succeed
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
