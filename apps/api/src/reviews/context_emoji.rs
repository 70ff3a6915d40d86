//! Content-aware emoji selection.
//!
//! A fixed, ordered table of keyword patterns and the emoji pool each one
//! unlocks. Evaluated top to bottom; the table is read-only after first use.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// At most this many content emoji are appended to a single review.
pub const MAX_CONTEXT_EMOJIS: usize = 2;

/// (keyword alternation, pool). Keywords are matched case-insensitively anywhere in the line.
const EMOJI_TABLE: &[(&str, &[&str])] = &[
    // beverages
    ("와인|wine|소믈리에|레드|화이트|스파클링", &["🍷", "🥂", "🍾"]),
    ("맥주|beer|생맥|하이볼|칵테일|바틀", &["🍺", "🍻", "🥃", "🍸"]),
    ("커피|라떼|에스프레소|카페|아메리카노", &["☕", "🧋", "🍰"]),
    // food
    ("디저트|케이크|빵|마카롱|달달|디저", &["🍰", "🧁", "🍩", "🍪"]),
    ("고기|스테이크|한우|삼겹|구이", &["🥩", "🍖", "🍗"]),
    ("해산물|회|초밥|스시|물회|오마카세", &["🍣", "🦐", "🦑", "🐟"]),
    ("매움|맵|매콤|얼큰", &["🌶️", "🔥"]),
    ("양 많|푸짐|포션|든든", &["🍽️", "🫶"]),
    // ambience
    ("테라스|야외|뷰|전망|루프탑|풍경", &["✨", "🌇", "🌃", "🌿"]),
    ("분위기|무드|아늑|감성|조명", &["✨", "🕯️", "🎶"]),
    // service
    ("친절|응대|서비스|사장님|직원", &["😊", "🤗", "🫶", "👍"]),
    ("빨리|빠르|서빙|대기 없|웨이팅 없|금방", &["⚡", "👍"]),
    ("예약|자리|좌석|대기", &["📅", "✅"]),
    ("청결|깨끗|위생|깔끔", &["✨", "🧼", "🧽"]),
    // logistics
    ("가격|가성비|비싸|저렴", &["💸", "👍"]),
    ("파티|생일|기념일|모임|단체", &["🎉", "🎂", "🎈"]),
    ("주차|발렛|파킹", &["🅿️", "🚗"]),
    ("아이|키즈|가족|유모차", &["👶", "👨\u{200D}👩\u{200D}👧\u{200D}👦"]),
    ("반려견|펫|강아지|고양이", &["🐶", "🐱", "🐾"]),
    ("배달|포장|테이크아웃", &["📦", "🏍️"]),
];

/// One row of the keyword dictionary.
#[derive(Debug)]
pub struct EmojiPoolEntry {
    pub pattern: Regex,
    pub pool: &'static [&'static str],
}

static EMOJI_POOLS: LazyLock<Vec<EmojiPoolEntry>> = LazyLock::new(|| {
    EMOJI_TABLE
        .iter()
        .map(|&(keywords, pool)| EmojiPoolEntry {
            pattern: Regex::new(&format!("(?i){keywords}")).expect("valid regex"),
            pool,
        })
        .collect()
});

pub fn emoji_pools() -> &'static [EmojiPoolEntry] {
    &EMOJI_POOLS
}

/// Picks one emoji from the pool of every matching entry, in table order,
/// drops duplicates and keeps the first `MAX_CONTEXT_EMOJIS`.
/// An empty result means the line has no content-based emoji.
pub fn pick_context_emojis<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Vec<&'static str> {
    let mut picked: Vec<&'static str> = Vec::new();

    for entry in emoji_pools().iter().filter(|e| e.pattern.is_match(text)) {
        if let Some(&glyph) = entry.pool.choose(rng) {
            if !picked.contains(&glyph) {
                picked.push(glyph);
            }
        }
    }

    picked.truncate(MAX_CONTEXT_EMOJIS);
    picked
}
