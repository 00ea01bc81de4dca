//! End-to-end decoding scenarios over small synthetic keyboards.

use swipe_decoder::{
    decode, DecoderConfig, Dictionary, KeyLayout, SwipeEvent, MAX_CANDIDATES,
};

fn build(words: &[&str], layout: &KeyLayout, config: &DecoderConfig) -> Dictionary {
    let mut dict = Dictionary::new(words.iter().map(|w| (*w).to_owned()).collect());
    dict.quantize(layout, config).expect("quantization failed");
    dict
}

#[test]
fn swipe_from_a_to_b_ranks_ab_first() {
    let layout = KeyLayout::parse("a:0:0 b:10:0\t").unwrap();
    let config = DecoderConfig::default()
        .with_cluster_count(2)
        .with_iterations(1);
    let dict = build(&["ab", "ba"], &layout, &config);
    let index = dict.build_index(config.seed);

    let event = SwipeEvent::parse("a:0:0 b:10:0\t0:0 2:0 5:0 8:0 10:0\tab").unwrap();
    let candidates = decode(&event, &dict, &layout, &index, &config).unwrap();

    assert_eq!(candidates[0].word, "ab");
    assert_eq!(event.target.as_deref(), Some("ab"));
}

#[test]
fn quantization_is_deterministic_per_seed() {
    let layout = KeyLayout::parse("a:0:0 b:50:0 c:0:50\t").unwrap();
    let config = DecoderConfig::default()
        .with_cluster_count(2)
        .with_iterations(1)
        .with_seed(31);

    let first = build(&["ab", "bc", "ca"], &layout, &config);
    let second = build(&["ab", "bc", "ca"], &layout, &config);

    assert_eq!(first.cluster_centers(), second.cluster_centers());
    for cluster in 0..first.cluster_centers().len() as u32 {
        assert_eq!(first.cluster_members(cluster), second.cluster_members(cluster));
    }
}

#[test]
fn decoder_handles_a_larger_synthetic_keyboard() {
    // A 3x3 grid of keys, 30-unit pitch.
    let layout = KeyLayout::parse(
        "q:0:0 w:30:0 e:60:0 a:0:30 s:30:30 d:60:30 z:0:60 x:30:60 c:60:60\t",
    )
    .unwrap();
    let words = [
        "qwe", "ewq", "asd", "dsa", "zxc", "cxz", "qaz", "wsx", "edc", "qsc", "esz", "wax",
    ];
    let config = DecoderConfig::default()
        .with_cluster_count(6)
        .with_iterations(4)
        .with_seed(3);
    let dict = build(&words, &layout, &config);
    let index = dict.build_index(config.seed);

    // Trace each word's own key centers and check it comes out on top.
    let mut correct = 0;
    for word in &words {
        let points: Vec<String> = word
            .chars()
            .map(|c| {
                let center = layout.key(c).unwrap().center();
                format!("{}:{}", center.x as i64, center.y as i64)
            })
            .collect();
        let line = format!("_\t{}\t{word}", points.join(" "));
        let event = SwipeEvent::parse(&line).unwrap();

        let candidates = decode(&event, &dict, &layout, &index, &config).unwrap();
        assert!(!candidates.is_empty(), "no candidates for {word}");
        assert!(candidates.len() <= MAX_CANDIDATES);
        if candidates[0].word == *word {
            correct += 1;
        }
    }

    // Perfect traces of distinct paths should essentially always win; a
    // couple of reversed-path collisions are tolerated.
    assert!(correct >= words.len() - 2, "only {correct} correct");
}

#[test]
fn candidates_serialize_for_reporting() {
    let layout = KeyLayout::parse("a:0:0 b:10:0\t").unwrap();
    let config = DecoderConfig::default()
        .with_cluster_count(2)
        .with_iterations(1);
    let dict = build(&["ab", "ba"], &layout, &config);
    let index = dict.build_index(config.seed);

    let event = SwipeEvent::parse("_\t0:0 5:0 10:0\tab").unwrap();
    let candidates = decode(&event, &dict, &layout, &index, &config).unwrap();

    let json = serde_json::to_string(&candidates).unwrap();
    assert!(json.contains("\"word\":\"ab\""));
}
