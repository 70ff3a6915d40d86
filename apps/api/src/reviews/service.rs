//! Review generation orchestration: prompt → generator → batch pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::errors::AppError;
use crate::reviews::emoji::has_emoji;
use crate::reviews::generator::{GenerationParams, ReviewGenerator};
use crate::reviews::options::GenerationOptions;
use crate::reviews::pipeline::process_batch;
use crate::reviews::prompts::build_review_prompt;

/// Generates up to `n` cleaned reviews for `summary`.
/// Randomness is seeded fresh from OS entropy on every call.
pub async fn generate_reviews(
    generator: &dyn ReviewGenerator,
    summary: &str,
    n: usize,
    options: &GenerationOptions,
) -> Result<Vec<String>, AppError> {
    let mut rng = StdRng::from_entropy();
    generate_reviews_with_rng(generator, summary, n, options, &mut rng).await
}

/// Same as [`generate_reviews`] with an injected random source.
///
/// Fails with `Generation` when nothing usable survives post-processing.
pub async fn generate_reviews_with_rng<R: Rng + Send>(
    generator: &dyn ReviewGenerator,
    summary: &str,
    n: usize,
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<Vec<String>, AppError> {
    let prompt = build_review_prompt(summary, n, options.emoji);
    let params = GenerationParams::from(options);

    let raw = generator.generate(&prompt, &params).await?;
    let reviews = process_batch(&raw, n, options, rng);

    if reviews.is_empty() {
        return Err(AppError::Generation(
            "model output contained no usable review lines".to_string(),
        ));
    }

    info!(
        "Generated reviews: requested={}, returned={}, decorated={}, model={}",
        n,
        reviews.len(),
        reviews.iter().filter(|r| has_emoji(r)).count(),
        options.model
    );

    Ok(reviews)
}
