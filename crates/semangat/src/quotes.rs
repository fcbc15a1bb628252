//! Fixed motivational quote list.

use rand::Rng;

/// The quotes served by `/api/quote`, in display order.
pub const QUOTES: [&str; 5] = [
    "Tetap berjuang — waktumu akan tiba.",
    "Tidak ada usaha yang sia-sia.",
    "Kamu jauh lebih kuat dari yang kamu pikirkan.",
    "Fokus hari ini menentukan masa depanmu.",
    "Langkah kecil hari ini adalah kemenangan besar esok.",
];

/// Stateless uniform picker over [`QUOTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteBook;

impl QuoteBook {
    /// Pick one quote uniformly at random. Repeats are allowed.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &'static str {
        QUOTES[rng.random_range(0..QUOTES.len())]
    }
}
