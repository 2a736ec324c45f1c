//! Terminal rendering of analysis results.

use lingolens_types::{
    AnalysisDocument, AnalysisResult, Conversation, DetectionResult, InputSummary, LanguagePair,
    Story, VocabularyResult,
};

/// Print an exported analysis document, header first.
pub fn print_document(doc: &AnalysisDocument) {
    println!("Analysis from {}", doc.timestamp.format("%Y-%m-%d %H:%M UTC"));
    match &doc.input {
        InputSummary::Image { name, size } => println!("Input: image {name} ({size} bytes)"),
        InputSummary::Description { description } => println!("Input: \"{description}\""),
    }
    print_result(&doc.results, doc.language_pair());
}

/// Print whichever sections of the result are present.
pub fn print_result(result: &AnalysisResult, pair: LanguagePair) {
    if let Some(detection) = &result.detection {
        print_detection(detection);
    }
    if let Some(vocabulary) = &result.vocabulary {
        print_vocabulary(vocabulary, pair);
    }
    if let Some(story) = &result.story {
        print_story(story);
    }
    if let Some(conversation) = &result.conversation {
        print_conversation(conversation);
    }
}

fn print_detection(detection: &DetectionResult) {
    println!("\n=== Scene ===");
    println!(
        "{} / {}: {}, {} mood",
        detection.scene.setting,
        detection.scene.location,
        detection.scene.activity,
        detection.scene.mood
    );
    for obj in &detection.objects {
        println!(
            "  {} ({:.0}%) - {}",
            obj.name,
            obj.confidence * 100.0,
            obj.description
        );
    }
}

fn print_vocabulary(vocabulary: &VocabularyResult, pair: LanguagePair) {
    println!(
        "\n=== Vocabulary ({}) ===",
        pair.target.display_name()
    );
    if vocabulary.vocabulary.is_empty() {
        println!("  (none)");
        return;
    }
    for (i, entry) in vocabulary.vocabulary.iter().enumerate() {
        let phonetic = entry
            .phonetic
            .as_deref()
            .map(|p| format!(" /{p}/"))
            .unwrap_or_default();
        println!(
            "{:>3}. {}{} = {}  [{}, {}]",
            i + 1,
            entry.word,
            phonetic,
            entry.translation,
            entry.category,
            entry.difficulty
        );
        println!("     {}", entry.example);
    }
}

fn print_story(story: &Story) {
    println!("\n=== Story: {} ===", story.title);
    println!("[{}, {} words]", story.difficulty, story.word_count);
    println!("{}", story.content);
    if !story.moral.is_empty() {
        println!("Moral: {}", story.moral);
    }
    if !story.key_vocabulary.is_empty() {
        println!("Key vocabulary: {}", story.key_vocabulary.join(", "));
    }
    if !story.translation.is_empty() {
        println!("Summary: {}", story.translation);
    }
}

fn print_conversation(conversation: &Conversation) {
    println!("\n=== Conversation: {} ===", conversation.scenario);
    println!(
        "[{}, participants: {}]",
        conversation.difficulty,
        conversation.participants.join(", ")
    );
    for line in &conversation.dialogue {
        println!("{}: {}", line.speaker, line.text);
        println!("{:width$}({})", "", line.translation, width = line.speaker.len() + 2);
    }
    if !conversation.cultural_notes.is_empty() {
        println!("Cultural notes: {}", conversation.cultural_notes);
    }
}
