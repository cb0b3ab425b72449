//! Chroma adapter: chain-style retrieval
//!
//! Context production is delegated to the retriever handle, which embeds the
//! query itself and picks its own k. The caller only ever sees the final
//! answer.

use ragchat_core::{
    ChatModel, ChatTurn, DocumentRetriever, Result, format_history, prompt, question_with_history,
};

use super::join_contents;

pub async fn answer(
    chat_model: &dyn ChatModel,
    model_id: &str,
    question: &str,
    retriever: &dyn DocumentRetriever,
    history: &[ChatTurn],
) -> Result<String> {
    let query = question_with_history(question, history);
    let documents = retriever.retrieve(&query).await?;
    let context = join_contents(&documents);

    let prompt = prompt::financial_advisor_prompt(&format_history(history), &context, question);
    chat_model.complete(model_id, &prompt).await
}
