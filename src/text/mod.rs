mod lemma;
mod preprocess;
mod stopwords;


pub use lemma::{IdentityLemmatizer, Lemmatizer, NounLemmatizer, SnowballLemmatizer};
pub use preprocess::{preprocess, Preprocessor};
pub use stopwords::{StopwordFilter, ENGLISH_STOPWORDS};
