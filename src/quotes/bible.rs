//! Bible reference tables
//!
//! The fixed book table used for random verse selection, and the book ->
//! reflection-text table behind a quote's `meaning` field. Selection is a
//! pure function of the injected [`Randomness`] provider.

use super::Randomness;

/// Popular books with their chapter counts
const BOOKS: &[(&str, u32)] = &[
    ("Genesis", 50),
    ("Exodus", 40),
    ("Psalms", 150),
    ("Proverbs", 31),
    ("Isaiah", 66),
    ("Matthew", 28),
    ("Mark", 16),
    ("Luke", 24),
    ("John", 21),
    ("Acts", 28),
    ("Romans", 16),
    ("Corinthians", 16),
    ("Ephesians", 6),
    ("Philippians", 4),
    ("James", 5),
    ("Peter", 5),
    ("Revelation", 22),
];

/// Verses are requested in this fixed range regardless of actual chapter
/// length. A reference past the real verse count is an ordinary fetch miss
/// and falls back to the general quote path.
const VERSE_RANGE: u32 = 20;

/// Reflection texts keyed by book name
const BOOK_MEANINGS: &[(&str, &str)] = &[
    ("Genesis", "This verse from Genesis reminds us of God's creative power and the foundations of faith. It speaks to new beginnings and God's sovereign plan for creation."),
    ("Exodus", "From Exodus, this passage reflects on God's deliverance and faithfulness. It reminds us that God leads His people out of bondage into freedom."),
    ("Psalms", "This Psalm expresses heartfelt worship and trust in God. It teaches us to bring our joys, sorrows, and prayers before the Lord."),
    ("Proverbs", "This proverb offers practical wisdom for daily living. It encourages us to seek understanding and walk in righteousness."),
    ("Isaiah", "Isaiah's prophetic words point us to God's holiness and His plan of redemption. This verse calls us to trust in the Lord's perfect timing."),
    ("Matthew", "From Matthew's Gospel, this verse teaches us about the Kingdom of Heaven and Jesus's teachings. It invites us to follow Christ more closely."),
    ("Mark", "Mark presents Jesus as the suffering Servant. This passage reminds us of Christ's mission and calls us to faithful discipleship."),
    ("Luke", "Luke emphasizes God's compassion for all people. This verse highlights the inclusive nature of God's love and salvation."),
    ("John", "John reveals the divine nature of Christ. This verse deepens our understanding of eternal life and our relationship with God."),
    ("Acts", "From Acts, this passage shows the power of the Holy Spirit in the early church. It inspires us to be bold witnesses for Christ."),
    ("Romans", "Paul's letter to the Romans explains salvation by grace through faith. This verse clarifies the Gospel and our response to it."),
    ("Corinthians", "This verse addresses Christian living and spiritual gifts. It guides us in building up the body of Christ with love."),
    ("Ephesians", "Ephesians reveals our identity in Christ. This passage reminds us of the spiritual blessings we have as believers."),
    ("Philippians", "Paul's letter of joy teaches us contentment. This verse encourages us to find our strength and satisfaction in Christ."),
    ("James", "James emphasizes faith in action. This practical teaching calls us to demonstrate our faith through good works."),
    ("Peter", "Peter writes about hope and perseverance. This verse strengthens us to stand firm in our faith during trials."),
    ("Revelation", "Revelation unveils the ultimate victory of Christ. This passage reminds us of the glorious future that awaits believers."),
];

/// Reflection used when the book is not in the table
const GENERIC_MEANING: &str = "Reflect on this verse and consider how it applies to your life. May it bring you wisdom, comfort, and inspiration for your daily walk.";

/// A `Book Chapter:Verse` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleReference {
    pub book: &'static str,
    pub chapter: u32,
    pub verse: u32,
}

impl BibleReference {
    /// Path segment for the Bible text API, e.g. `John+3:16`
    pub fn request_path(&self) -> String {
        format!("{}+{}:{}", self.book, self.chapter, self.verse)
    }

    /// Human-readable form, e.g. `John 3:16`
    pub fn display(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Pick a uniformly random book, chapter, and verse
pub fn random_reference(rng: &dyn Randomness) -> BibleReference {
    let (book, chapters) = BOOKS[rng.pick(BOOKS.len())];
    let chapter = rng.pick(chapters as usize) as u32 + 1;
    let verse = rng.pick(VERSE_RANGE as usize) as u32 + 1;

    BibleReference {
        book,
        chapter,
        verse,
    }
}

/// Reflection text for a verse reference.
///
/// Extracts the book name, stripping any leading numeral so "2 Peter 1:3"
/// resolves through the "Peter" entry. Unlisted books get the generic text.
pub fn meaning_for_verse(reference: &str) -> String {
    let rest = reference
        .trim_start()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start();

    let book: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    BOOK_MEANINGS
        .iter()
        .find(|(name, _)| *name == book)
        .map(|(_, meaning)| (*meaning).to_string())
        .unwrap_or_else(|| GENERIC_MEANING.to_string())
}
