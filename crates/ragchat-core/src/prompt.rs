//! Prompt templates for answer generation
//!
//! Two fixed templates with interpolation points for history, context, and
//! question. User content passes through unescaped; the templates are only
//! ever sent to the chat provider, never executed or persisted.

/// Build the financial-advisor prompt (Chroma, FAISS, and Weaviate backends)
pub fn financial_advisor_prompt(history: &str, context: &str, question: &str) -> String {
    format!(
        "You are an expert financial advisor. Use the context and chat history to answer questions accurately.\n\
         Chat History:\n{history}\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}\n\n\
         Answer (be specific and avoid hallucinations):"
    )
}

/// Build the helpful-assistant prompt (Qdrant and Pinecone backends)
pub fn assistant_prompt(history: &str, context: &str, question: &str) -> String {
    format!(
        "You are a helpful assistant. Use the retrieved documents and chat history to answer.\n\n\
         Chat History:\n{history}\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}\n\n\
         Answer:"
    )
}
