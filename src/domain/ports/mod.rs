pub mod vectorizer;
