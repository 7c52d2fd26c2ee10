//! English content set for the seven material types.

use super::{DocumentBuilder, StructuredDocument};
use crate::job::models::{Audience, JobMetadata, Level, Tone, TrainingContext};
use crate::material::models::MaterialType;

pub fn generate(material_type: MaterialType, meta: &JobMetadata) -> StructuredDocument {
    match material_type {
        MaterialType::Foundation => foundation(meta),
        MaterialType::Slides => slides(meta),
        MaterialType::Facilitator => facilitator(meta),
        MaterialType::Participant => participant(meta),
        MaterialType::Activities => activities(meta),
        MaterialType::Evaluation => evaluation(meta),
        MaterialType::Resources => resources(meta),
    }
}

fn level_word(level: Level) -> &'static str {
    match level {
        Level::Beginner => "beginner",
        Level::Intermediate => "intermediate",
        Level::Advanced => "advanced",
    }
}

fn audience_word(audience: Audience) -> &'static str {
    match audience {
        Audience::Managers => "managers",
        Audience::Employees => "employees",
        Audience::Students => "students",
        Audience::Trainers => "trainers",
        Audience::General => "a general audience",
    }
}

fn tone_word(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "professional",
        Tone::Friendly => "friendly",
        Tone::Academic => "academic",
        Tone::Casual => "casual",
    }
}

fn context_word(context: TrainingContext) -> &'static str {
    match context {
        TrainingContext::Corporate => "corporate",
        TrainingContext::Academic => "academic",
        TrainingContext::Community => "community",
        TrainingContext::Online => "online",
    }
}

fn foundation(meta: &JobMetadata) -> StructuredDocument {
    let level = level_word(meta.level);
    let audience = audience_word(meta.audience);
    let context = context_word(meta.context);
    DocumentBuilder::new()
        .h1(format!("{}: Course Foundation & Agenda", meta.subject))
        .p(format!(
            "A {} {} course on {} designed for {} in a {} setting, \
             delivered in a {} tone over {}.",
            level,
            context,
            meta.subject,
            audience,
            context,
            tone_word(meta.tone),
            meta.duration
        ))
        .h2("Learning Objectives")
        .bullet(format!(
            "Explain the core concepts of {} at a {} level.",
            meta.subject, level
        ))
        .bullet(format!(
            "Apply {} techniques to situations {} face every day.",
            meta.subject, audience
        ))
        .bullet(format!(
            "Evaluate personal progress against the {} outcomes of this course.",
            level
        ))
        .h2("Agenda")
        .bullet(format!("Welcome and introductions ({} total)", meta.duration))
        .bullet(format!("Module 1: Foundations of {}", meta.subject))
        .bullet(format!("Module 2: {} in practice", meta.subject))
        .bullet("Module 3: Group activities and discussion".to_string())
        .bullet("Wrap-up, evaluation and next steps".to_string())
        .h2("Audience Profile")
        .p(format!(
            "This course assumes {} participants are {}, with no further \
             prerequisites beyond an interest in {}.",
            audience, level, meta.subject
        ))
        .build()
}

fn slides(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("{} — Slide Deck", meta.subject))
        .p(format!(
            "Presentation slides for a {} session of {}, written in a {} tone for {}.",
            meta.duration,
            meta.subject,
            tone_word(meta.tone),
            audience
        ))
        .h1(format!("Why {} Matters", meta.subject))
        .bullet(format!(
            "The role of {} in a {} environment",
            meta.subject,
            context_word(meta.context)
        ))
        .bullet(format!("What {} gain from mastering it", audience))
        .h1("Core Concepts")
        .bullet(format!(
            "Key terminology of {} at the {} level",
            meta.subject,
            level_word(meta.level)
        ))
        .bullet("Common pitfalls and how to avoid them".to_string())
        .h1("Putting It Into Practice")
        .bullet(format!("Applied scenarios drawn from {} life", context_word(meta.context)))
        .bullet("Discussion prompts for the group".to_string())
        .h1("Summary & Next Steps")
        .bullet("Recap of the learning objectives".to_string())
        .bullet(format!("Where to go deeper into {}", meta.subject))
        .build()
}

fn facilitator(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("Facilitator Guide: {}", meta.subject))
        .p(format!(
            "How to run this {} course for {}. Keep the tone {}; the full \
             session fits in {}.",
            level_word(meta.level),
            audience,
            tone_word(meta.tone),
            meta.duration
        ))
        .h2("Before the Session")
        .bullet("Review the slide deck and participant guide.".to_string())
        .bullet(format!(
            "Adapt the {} examples to your group's {} context.",
            meta.subject,
            context_word(meta.context)
        ))
        .bullet("Prepare the activity handouts and the evaluation form.".to_string())
        .h2("Session Flow")
        .bullet(format!(
            "Open with why {} matters to {} (10% of the time).",
            meta.subject, audience
        ))
        .bullet("Teach the core concepts with the slide deck (40%).".to_string())
        .bullet("Run the group activities (35%).".to_string())
        .bullet("Close with evaluation and next steps (15%).".to_string())
        .h2("Facilitation Notes")
        .p(format!(
            "Participants at the {} level tend to ask for concrete examples; \
             keep a stock of {} stories from a {} setting ready.",
            level_word(meta.level),
            meta.subject,
            context_word(meta.context)
        ))
        .build()
}

fn participant(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Participant Guide: {}", meta.subject))
        .p(format!(
            "Welcome! Over the next {} you will build {} skills in {} \
             through short lessons, exercises and group work.",
            meta.duration,
            level_word(meta.level),
            meta.subject
        ))
        .h2("What You Will Learn")
        .bullet(format!("The vocabulary and core ideas of {}.", meta.subject))
        .bullet(format!(
            "Practical techniques you can use as {} right away.",
            audience_word(meta.audience)
        ))
        .bullet("How to keep improving after the course ends.".to_string())
        .h2("How to Use This Guide")
        .p(format!(
            "Each section mirrors a module of the session. Space is provided \
             for your own notes; the tone throughout is deliberately {} to \
             match the session itself.",
            tone_word(meta.tone)
        ))
        .h2("Key Takeaways")
        .bullet(format!(
            "{} is a skill — it improves with deliberate practice.",
            meta.subject
        ))
        .bullet(format!(
            "The {} scenarios in the activities are safe places to fail.",
            context_word(meta.context)
        ))
        .bullet("Your evaluation feedback shapes the next edition of this course.".to_string())
        .build()
}

fn activities(meta: &JobMetadata) -> StructuredDocument {
    let audience = audience_word(meta.audience);
    DocumentBuilder::new()
        .h1(format!("Group Activities: {}", meta.subject))
        .p(format!(
            "Three exercises sized for a {} session, tuned for {} at the {} \
             level.",
            meta.duration,
            audience,
            level_word(meta.level)
        ))
        .h2("Activity 1: Warm-Up Pairs")
        .p(format!(
            "In pairs, share one real situation where {} went wrong in a {} \
             setting. Five minutes per person.",
            meta.subject,
            context_word(meta.context)
        ))
        .h2("Activity 2: Role Play")
        .p(format!(
            "Small groups act out a {} scenario; one observer per group notes \
             which {} techniques appear.",
            context_word(meta.context),
            meta.subject
        ))
        .bullet("Rotate roles so everyone observes once.".to_string())
        .bullet("Debrief in plenary; keep the feedback constructive.".to_string())
        .h2("Activity 3: Action Plan")
        .p(format!(
            "Each participant writes three ways to apply {} in their own work \
             during the next month, phrased in the same {} register used \
             throughout the course.",
            meta.subject,
            tone_word(meta.tone)
        ))
        .build()
}

fn evaluation(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Course Evaluation: {}", meta.subject))
        .p(format!(
            "Collected at the end of the {} session to measure whether the \
             {} objectives were met for {}.",
            meta.duration,
            level_word(meta.level),
            audience_word(meta.audience)
        ))
        .h2("Knowledge Check")
        .bullet(format!("Name the three core concepts of {}.", meta.subject))
        .bullet(format!(
            "Describe one {} technique you practiced today and when you would use it.",
            meta.subject
        ))
        .bullet(format!(
            "Which {} scenario from the activities felt most realistic, and why?",
            context_word(meta.context)
        ))
        .h2("Session Feedback")
        .bullet("Rate the pacing of the session (1-5).".to_string())
        .bullet(format!(
            "Was the {} tone appropriate for your workplace? (yes/no)",
            tone_word(meta.tone)
        ))
        .bullet("What should the facilitator change next time?".to_string())
        .build()
}

fn resources(meta: &JobMetadata) -> StructuredDocument {
    DocumentBuilder::new()
        .h1(format!("Further Resources: {}", meta.subject))
        .p(format!(
            "Curated follow-up material for {} who finished the {} course and \
             want to go beyond the {} session.",
            audience_word(meta.audience),
            level_word(meta.level),
            meta.duration
        ))
        .h2("Deepen the Theory")
        .bullet(format!(
            "Foundational reading on {} appropriate for {} learners.",
            meta.subject,
            level_word(meta.level)
        ))
        .bullet(format!(
            "Case studies of {} applied in {} organizations.",
            meta.subject,
            context_word(meta.context)
        ))
        .h2("Keep Practicing")
        .bullet("Peer practice groups - rerun the role plays with colleagues.".to_string())
        .bullet(format!(
            "A {} journal: note one {} decision per week and review monthly.",
            tone_word(meta.tone),
            meta.subject
        ))
        .build()
}
