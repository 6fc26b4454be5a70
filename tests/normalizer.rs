use nlqa::text::Normalizer;

const SAMPLES: &[&str] = &[
    "What is 2+2",
    "Hello!",
    "  Who wrote 'Hamlet'?  ",
    "e-mail me @ 10:30, ok?",
    "ÀÉÎ ÕÜ: façade, naïve",
    "tabs\tand\nnewlines",
    "...",
    "",
];

#[test]
fn normalization_is_idempotent() {
    let normalizer = Normalizer::new().unwrap();
    for sample in SAMPLES {
        let once = normalizer.normalize(sample);
        let twice = normalizer.normalize(&once.text);
        assert_eq!(once.text, twice.text, "sample: {:?}", sample);
        assert_eq!(once.tokens, twice.tokens, "sample: {:?}", sample);
    }
}

#[test]
fn tokens_empty_only_for_punctuation_and_whitespace() {
    let normalizer = Normalizer::new().unwrap();
    for sample in SAMPLES {
        let only_punct = sample.chars().all(|c| !c.is_alphanumeric() && c != '_');
        let tokens = normalizer.normalize(sample).tokens;
        assert_eq!(tokens.is_empty(), only_punct, "sample: {:?}", sample);
    }
}

#[test]
fn tokens_are_lowercase_words_of_the_text() {
    let normalizer = Normalizer::new().unwrap();
    let n = normalizer.normalize("e-mail me @ 10:30, ok?");
    assert_eq!(n.text, "email me  1030 ok");
    assert_eq!(n.tokens, vec!["email", "me", "1030", "ok"]);
    assert_eq!(n.tokens.join(" "), n.text.split_whitespace().collect::<Vec<_>>().join(" "));
}
