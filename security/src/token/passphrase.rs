use rand::thread_rng;
use rand::Rng;

/// Word list for diceware-style passphrase generation.
///
/// Short, unambiguous English words. With 128 words, each word adds
/// 7 bits of entropy.
const WORDS: [&str; 128] = [
    "acid", "acorn", "alarm", "amber", "anchor", "apple", "arrow", "atlas",
    "attic", "badge", "bagel", "basil", "beach", "bench", "birch", "blade",
    "blank", "blaze", "brick", "brush", "cabin", "cable", "camel", "candle",
    "canoe", "cedar", "chalk", "cherry", "chess", "cliff", "cloud", "clover",
    "cobalt", "comet", "coral", "crane", "crumb", "cycle", "daisy", "delta",
    "denim", "dome", "donut", "eagle", "ember", "fable", "falcon", "fern",
    "flint", "foam", "forge", "fossil", "fox", "frost", "gator", "gem",
    "glade", "globe", "grape", "gravel", "grove", "harbor", "hazel", "hedge",
    "helmet", "husk", "igloo", "ivory", "jade", "jigsaw", "juniper", "kayak",
    "kettle", "lagoon", "lantern", "lemon", "lichen", "lilac", "lotus", "lunar",
    "magnet", "maple", "marble", "meadow", "mint", "mirror", "molar", "mural",
    "nectar", "nickel", "nutmeg", "oasis", "ochre", "olive", "onyx", "orbit",
    "otter", "panda", "pearl", "pebble", "pepper", "pine", "plume", "prism",
    "quartz", "quill", "raven", "reef", "ridge", "river", "robin", "rustic",
    "saddle", "sage", "salmon", "shale", "sierra", "slate", "sparrow", "spruce",
    "summit", "tiger", "topaz", "tulip", "velvet", "walnut", "willow", "zephyr",
];

/// Separator placed between passphrase words.
const SEPARATOR: &str = "-";

/// Generate a diceware-style passphrase.
///
/// Samples `word_count` words uniformly at random from the embedded word
/// list and joins them with a separator. Useful for human-friendly
/// generated passwords.
///
/// # Arguments
/// * `word_count` - Number of words in the passphrase
///
/// # Returns
/// Passphrase string, e.g. `"maple-quartz-lagoon-ember"`
pub fn generate_passphrase(word_count: usize) -> String {
    let mut rng = thread_rng();

    (0..word_count)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
