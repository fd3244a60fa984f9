pub mod tfidf;
