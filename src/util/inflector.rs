//! English inflections for resource and class names.
//!
//! Only the last `_`-separated word is inflected, so `custom_member`
//! pluralizes to `custom_members`.

/// Words with the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// (singular, plural) pairs that follow no rule.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("movie", "movies"),
    ("zombie", "zombies"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
];

/// Plural form of a word. Words that already look plural are kept.
pub fn pluralize(word: &str) -> String {
    inflect_last(word, pluralize_word)
}

/// Singular form of a word. Words that already look singular are kept.
pub fn singularize(word: &str) -> String {
    inflect_last(word, singularize_word)
}

/// `CustomAdventure` -> `custom_adventure`, `HTMLPage` -> `html_page`.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map(|n| n.is_lowercase()).unwrap_or(false),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// `custom_adventure` -> `CustomAdventure`.
pub fn camelize(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Class name for a resource or association name: `members` -> `Member`.
pub fn classify(name: &str) -> String {
    camelize(&singularize(&underscore(name)))
}

/// Resource collection name for a class: `CustomMember` -> `custom_members`.
pub fn tableize(class_name: &str) -> String {
    pluralize(&underscore(class_name))
}

/// Foreign key attribute pointing at a class: `Adventure` -> `adventure_id`.
pub fn foreign_key(class_name: &str) -> String {
    format!("{}_id", underscore(class_name))
}

fn inflect_last(word: &str, inflect: fn(&str) -> String) -> String {
    match word.rfind('_') {
        Some(pos) => format!("{}{}", &word[..=pos], inflect(&word[pos + 1..])),
        None => inflect(word),
    }
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == lower) {
        return match_case(word, plural);
    }
    if IRREGULAR.iter().any(|(_, p)| *p == lower) {
        return word.to_string();
    }

    if lower.ends_with('s') && !(lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is")) {
        return word.to_string();
    }

    let stem = |n: usize| &word[..word.len() - n];

    if lower.ends_with("is") {
        format!("{}es", stem(2))
    } else if ["ss", "sh", "ch", "x", "z", "us"].iter().any(|s| lower.ends_with(s)) {
        format!("{}es", word)
    } else if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
        format!("{}ies", stem(1))
    } else if lower.ends_with("lf") || lower.ends_with("rf") {
        format!("{}ves", stem(1))
    } else if lower.ends_with("fe") && !lower.ends_with("ffe") {
        format!("{}ves", stem(2))
    } else {
        format!("{}s", word)
    }
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, p)| *p == lower) {
        return match_case(word, singular);
    }
    if IRREGULAR.iter().any(|(s, _)| *s == lower) {
        return word.to_string();
    }

    let stem = |n: usize| &word[..word.len() - n];

    if lower.ends_with("ies") && lower.len() > 3 {
        format!("{}y", stem(3))
    } else if lower.ends_with("lves") || lower.ends_with("rves") {
        format!("{}f", stem(3))
    } else if lower.ends_with("ives") {
        format!("{}fe", stem(3))
    } else if ["sses", "shes", "ches", "xes", "statuses", "aliases"]
        .iter()
        .any(|s| lower.ends_with(s))
        || lower == "buses"
    {
        stem(2).to_string()
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') {
        stem(1).to_string()
    } else {
        word.to_string()
    }
}

fn ends_with_vowel_y(lower: &str) -> bool {
    ["ay", "ey", "iy", "oy", "uy"].iter().any(|s| lower.ends_with(s))
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().map(char::is_uppercase).unwrap_or(false) {
        camelize(replacement)
    } else {
        replacement.to_string()
    }
}
