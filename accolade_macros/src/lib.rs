mod record;

use proc_macro::TokenStream;

/// Derive macro for the `Record` trait.
///
/// Every persisted row names the collection it lives in and the fields that
/// make up its storage key. Composite keys are joined with `:` in field order.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, Record)]
/// #[record(collection = "awards")]
/// pub struct AwardRecord {
///     #[record(key)]
///     pub learner_id: String,
///     #[record(key)]
///     pub achievement_id: String,
///     pub earned_at: DateTime<Utc>,
/// }
/// ```
///
/// Without a `collection` attribute the collection defaults to the snake_case
/// struct name plus `s`. Without any `#[record(key)]` field the field named
/// `id` is used.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
