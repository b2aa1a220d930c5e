//! Hardcoded document used when the content API cannot be reached.

use super::{Section, SectionKind, SiteContent};

pub(super) fn document() -> SiteContent {
    let mut sections = vec![
        Section::new("intro", SectionKind::Plain, "Second Year Recap")
            .with_body(
                "Looking back at our second year together, we've grown stronger as a couple \
                 and explored more delicious foods.",
            )
            .with_image("images/beginning.jpg"),
        Section::new("memories", SectionKind::Plain, "Beautiful Memories")
            .with_body(
                "Through laughter, tears, and countless adventures, we've built a treasure \
                 chest of memories.",
            )
            .with_year("2021-2023")
            .with_image("images/memories.jpg"),
        Section::new("milestones", SectionKind::Plain, "Milestones")
            .with_body("Every milestone we've crossed together has made our bond stronger.")
            .with_year("2024")
            .with_image("images/milestones.jpg"),
        Section::new("future", SectionKind::Plain, "Our Future")
            .with_body("Our story is just beginning.")
            .with_year("2025+")
            .with_image("images/future.jpg"),
        Section::new("puzzle", SectionKind::Puzzle, "Complete Our Memory")
            .with_body("Drag and drop the pieces to complete this photo.")
            .with_image("images/puzzle-photo.jpeg"),
        Section::new("memory-cards", SectionKind::Cards, "Memory Lane Matching")
            .with_body("Tap two cards to find the matching pairs!")
            .with_card_photos((1..=8).map(|n| format!("images/card-photos/card{n}.jpeg"))),
        Section::new("anniversary-video", SectionKind::Video, "Our Journey Together")
            .with_body("A video compilation of our second year together.")
            .with_year("🎬")
            .with_video("videos/anniversary-video.mp4", Some("0:38")),
    ];

    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index as u32;
    }

    SiteContent {
        title: "Happy Anniversary!".to_string(),
        subtitle: "Celebrating 2 Years of Love and Memories".to_string(),
        sections,
    }
}
