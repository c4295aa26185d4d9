/// Where the scene seed comes from.
///
/// Entropy is drawn here and nowhere else; everything below the scene
/// receives an explicit seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    Fixed(u64),
    #[default]
    Entropy,
}

impl SeedPolicy {
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Fixed)
    }

    pub fn resolve(self) -> u64 {
        match self {
            Self::Fixed(seed) => seed,
            Self::Entropy => rand::random(),
        }
    }
}
