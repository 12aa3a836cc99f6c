use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub fn flip<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CoinFace::Heads => "Heads",
            CoinFace::Tails => "Tails",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CoinFace::Heads => "🟡",
            CoinFace::Tails => "⚪",
        }
    }

    pub fn colour(self) -> u32 {
        match self {
            CoinFace::Heads => 0xffff00,
            CoinFace::Tails => 0xffffff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_both_faces_show_up() {
        let mut rng = StdRng::seed_from_u64(11);
        let flips: Vec<CoinFace> = (0..200).map(|_| CoinFace::flip(&mut rng)).collect();
        let heads = flips.iter().filter(|f| **f == CoinFace::Heads).count();
        assert!(heads > 50 && heads < 150, "heads = {}", heads);
    }
}
