//! Weaviate adapter: vector store as retriever
//!
//! The store hands out its own retriever abstraction; the adapter pulls
//! context through it during invocation. k is the store's default.

use ragchat_core::{
    ChatModel, ChatTurn, Result, RetrieverFactory, format_history, prompt, question_with_history,
};

use super::join_contents;

pub async fn answer(
    chat_model: &dyn ChatModel,
    model_id: &str,
    question: &str,
    store: &dyn RetrieverFactory,
    history: &[ChatTurn],
) -> Result<String> {
    let retriever = store.as_retriever();

    let query = question_with_history(question, history);
    let documents = retriever.retrieve(&query).await?;
    let context = join_contents(&documents);

    let prompt = prompt::financial_advisor_prompt(&format_history(history), &context, question);
    chat_model.complete(model_id, &prompt).await
}
