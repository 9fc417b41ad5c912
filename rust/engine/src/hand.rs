use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Hand categories, weakest first. The discriminant is the wire value (0..=8).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Comparable value of a five-card hand.
///
/// Ordering is category first, then `tiebreakers` element-wise, so the
/// derived `Ord` is the poker ordering. Tiebreakers are ranks (2..=14),
/// highest significance first; a wheel straight carries `[5]`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    pub tiebreakers: Vec<u8>,
}

impl HandValue {
    pub fn describe(&self) -> String {
        describe(self.category, &self.tiebreakers)
    }
}

/// Ranks exactly five cards.
///
/// # Examples
///
/// ```
/// use shellpoker_engine::cards::Card;
/// use shellpoker_engine::hand::{evaluate5, Category};
///
/// let cards: Vec<Card> = ["4c", "4d", "9h", "Qs", "2c"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let v = evaluate5(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
/// assert_eq!(v.category, Category::OnePair);
/// assert_eq!(v.tiebreakers, vec![4, 12, 9, 2]);
/// ```
pub fn evaluate5(cards: &[Card; 5]) -> HandValue {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    for &r in &ranks {
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }

    // (count, rank) most frequent first, higher rank first among equals
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = straight_high_from_mask(rank_mask);

    let kickers = |exclude: &[u8], n: usize| -> Vec<u8> {
        ranks
            .iter()
            .copied()
            .filter(|r| !exclude.contains(r))
            .take(n)
            .collect()
    };

    if let (true, Some(high)) = (is_flush, straight_high) {
        return HandValue {
            category: Category::StraightFlush,
            tiebreakers: vec![high],
        };
    }

    let (top_count, top_rank) = groups[0];
    let second = groups.get(1).copied();

    if top_count == 4 {
        let mut t = vec![top_rank];
        t.extend(kickers(&[top_rank], 1));
        return HandValue {
            category: Category::FourOfAKind,
            tiebreakers: t,
        };
    }

    if let (3, Some((2, pair_rank))) = (top_count, second) {
        return HandValue {
            category: Category::FullHouse,
            tiebreakers: vec![top_rank, pair_rank],
        };
    }

    if is_flush {
        return HandValue {
            category: Category::Flush,
            tiebreakers: ranks,
        };
    }

    if let Some(high) = straight_high {
        return HandValue {
            category: Category::Straight,
            tiebreakers: vec![high],
        };
    }

    if top_count == 3 {
        let mut t = vec![top_rank];
        t.extend(kickers(&[top_rank], 2));
        return HandValue {
            category: Category::ThreeOfAKind,
            tiebreakers: t,
        };
    }

    if let (2, Some((2, low_pair))) = (top_count, second) {
        let mut t = vec![top_rank, low_pair];
        t.extend(kickers(&[top_rank, low_pair], 1));
        return HandValue {
            category: Category::TwoPair,
            tiebreakers: t,
        };
    }

    if top_count == 2 {
        let mut t = vec![top_rank];
        t.extend(kickers(&[top_rank], 3));
        return HandValue {
            category: Category::OnePair,
            tiebreakers: t,
        };
    }

    HandValue {
        category: Category::HighCard,
        tiebreakers: ranks,
    }
}

/// Best five-card value among `cards`, or `None` with fewer than five.
/// Works for any hand size; showdown calls it with 5, 6 or 7 cards.
pub fn best_hand(cards: &[Card]) -> Option<HandValue> {
    if cards.len() < 5 {
        return None;
    }
    Some(scan_combinations(cards))
}

/// Best value over all 21 five-card subsets of seven cards.
pub fn best_hand_from_seven(cards: &[Card; 7]) -> HandValue {
    scan_combinations(cards)
}

fn scan_combinations(cards: &[Card]) -> HandValue {
    let n = cards.len();
    // Empty tiebreakers sort below every real value.
    let mut best = HandValue {
        category: Category::HighCard,
        tiebreakers: Vec::new(),
    };
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let v = evaluate5(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if v > best {
                            best = v;
                        }
                    }
                }
            }
        }
    }
    best
}

// Sliding 5-bit window from Ace(14) down to 5, with the Ace also set at bit 1.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn rank_name(r: u8) -> String {
    match r {
        11 => "Jack".to_string(),
        12 => "Queen".to_string(),
        13 => "King".to_string(),
        14 => "Ace".to_string(),
        _ => r.to_string(),
    }
}

fn rank_name_plural(r: u8) -> String {
    match r {
        11 => "Jacks".to_string(),
        12 => "Queens".to_string(),
        13 => "Kings".to_string(),
        14 => "Aces".to_string(),
        _ => format!("{}s", r),
    }
}

/// Human-readable name of a hand, e.g. `"Full House, Kings over 4s"`.
pub fn describe(category: Category, tiebreakers: &[u8]) -> String {
    let t0 = tiebreakers.first().copied().unwrap_or(0);
    let t1 = tiebreakers.get(1).copied().unwrap_or(0);
    match category {
        Category::StraightFlush if t0 == 14 => "Royal Flush".to_string(),
        Category::StraightFlush => format!("Straight Flush, {} high", rank_name(t0)),
        Category::FourOfAKind => format!("Four of a Kind, {}", rank_name_plural(t0)),
        Category::FullHouse => format!(
            "Full House, {} over {}",
            rank_name_plural(t0),
            rank_name_plural(t1)
        ),
        Category::Flush => format!("Flush, {} high", rank_name(t0)),
        Category::Straight if t0 == 5 => "Straight, 5 high (Wheel)".to_string(),
        Category::Straight => format!("Straight, {} high", rank_name(t0)),
        Category::ThreeOfAKind => format!("Three of a Kind, {}", rank_name_plural(t0)),
        Category::TwoPair => format!(
            "Two Pair, {} and {}",
            rank_name_plural(t0),
            rank_name_plural(t1)
        ),
        Category::OnePair => format!("Pair of {}", rank_name_plural(t0)),
        Category::HighCard => format!("High Card, {}", rank_name(t0)),
    }
}
