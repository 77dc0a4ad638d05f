use crate::{
    application::services::block_renderer,
    domain::models::{Align, BlockStyle, ContentBlock, Registration, Webinar},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html_body: String,
}

/// Builds the webinar lifecycle emails from content blocks.
#[derive(Debug, Clone)]
pub struct WebinarMailComposer {
    app_base_url: String,
}

impl WebinarMailComposer {
    pub fn new(app_base_url: impl Into<String>) -> Self {
        let app_base_url: String = app_base_url.into();
        Self {
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn join_link(&self, webinar: &Webinar, registration: &Registration) -> String {
        format!(
            "{}/webinars/{}/join?registration={}",
            self.app_base_url, webinar.id, registration.id
        )
    }

    pub fn confirmation(&self, webinar: &Webinar, registration: &Registration) -> ComposedEmail {
        let text = EscapedText::new(webinar, registration);
        let mut blocks = vec![
            heading(format!("You're registered for {}", text.title)),
            paragraph(format!("Hi {},", text.name)),
            paragraph(format!(
                "Thanks for registering. Your seat for <strong>{}</strong> with {} is confirmed.",
                text.title, text.presenter
            )),
        ];
        blocks.extend(schedule_blocks(webinar));
        if !webinar.description.trim().is_empty() {
            blocks.push(paragraph(block_renderer::escape_html(&webinar.description)));
        }
        blocks.push(paragraph(
            "We'll send you a reminder the day before and again one hour before we go live."
                .to_string(),
        ));

        ComposedEmail {
            subject: format!("You're registered: {}", webinar.title),
            html_body: block_renderer::render(&blocks),
        }
    }

    pub fn reminder_24h(&self, webinar: &Webinar, registration: &Registration) -> ComposedEmail {
        let text = EscapedText::new(webinar, registration);
        let mut blocks = vec![
            heading(format!("{} starts tomorrow", text.title)),
            paragraph(format!("Hi {},", text.name)),
            paragraph(format!(
                "This is a friendly reminder that <strong>{}</strong> with {} starts in 24 hours.",
                text.title, text.presenter
            )),
        ];
        blocks.extend(schedule_blocks(webinar));
        blocks.push(paragraph(
            "Add it to your calendar so you don't miss it. We'll send your join link one hour before the start."
                .to_string(),
        ));

        ComposedEmail {
            subject: format!("Reminder: {} is tomorrow", webinar.title),
            html_body: block_renderer::render(&blocks),
        }
    }

    pub fn reminder_1h(&self, webinar: &Webinar, registration: &Registration) -> ComposedEmail {
        let text = EscapedText::new(webinar, registration);
        let join_link = self.join_link(webinar, registration);
        let mut blocks = vec![
            heading(format!("{} starts in 1 hour", text.title)),
            paragraph(format!("Hi {},", text.name)),
            paragraph(format!(
                "We're going live soon! <strong>{}</strong> with {} begins in one hour.",
                text.title, text.presenter
            )),
        ];
        blocks.extend(schedule_blocks(webinar));
        blocks.push(button("Join the webinar", join_link.clone()));
        blocks.push(small_print(format!(
            "If the button doesn't work, copy this link into your browser: {join_link}"
        )));

        ComposedEmail {
            subject: format!("Starting in 1 hour: {}", webinar.title),
            html_body: block_renderer::render(&blocks),
        }
    }

    pub fn thank_you(
        &self,
        webinar: &Webinar,
        registration: &Registration,
        recording_url: Option<&str>,
    ) -> ComposedEmail {
        let text = EscapedText::new(webinar, registration);
        let mut blocks = vec![
            heading(format!("Thanks for joining {}", text.title)),
            paragraph(format!("Hi {},", text.name)),
            paragraph(format!(
                "Thank you for attending <strong>{}</strong> with {}. We hope you found it valuable.",
                text.title, text.presenter
            )),
        ];
        match recording_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => {
                blocks.push(paragraph(
                    "Missed something or want to watch it again? The recording is ready."
                        .to_string(),
                ));
                blocks.push(button("Watch the recording", url.to_string()));
            }
            None => blocks.push(paragraph(
                "We'll let you know as soon as the recording is available.".to_string(),
            )),
        }

        ComposedEmail {
            subject: format!("Thank you for attending {}", webinar.title),
            html_body: block_renderer::render(&blocks),
        }
    }
}

/// Caller-supplied text, escaped for element content. Subjects stay raw.
struct EscapedText {
    title: String,
    presenter: String,
    name: String,
}

impl EscapedText {
    fn new(webinar: &Webinar, registration: &Registration) -> Self {
        Self {
            title: block_renderer::escape_html(&webinar.title),
            presenter: block_renderer::escape_html(&webinar.presenter_name),
            name: block_renderer::escape_html(&registration.name),
        }
    }
}

fn schedule_blocks(webinar: &Webinar) -> Vec<ContentBlock> {
    vec![
        ContentBlock::Divider {
            thickness: None,
            style: BlockStyle::default(),
        },
        paragraph(format!(
            "<strong>Date:</strong> {}<br><strong>Time:</strong> {}<br><strong>Duration:</strong> {} minutes",
            webinar.scheduled_at.format("%A, %B %-d, %Y"),
            webinar.scheduled_at.format("%-I:%M %p UTC"),
            webinar.duration_minutes
        )),
        ContentBlock::Divider {
            thickness: None,
            style: BlockStyle::default(),
        },
    ]
}

fn heading(content: String) -> ContentBlock {
    ContentBlock::Heading {
        content,
        level: Some(1),
        style: BlockStyle {
            align: Some(Align::Center),
            ..Default::default()
        },
    }
}

fn paragraph(content: String) -> ContentBlock {
    ContentBlock::Paragraph {
        content,
        style: BlockStyle::default(),
    }
}

fn small_print(content: String) -> ContentBlock {
    ContentBlock::Paragraph {
        content,
        style: BlockStyle {
            color: Some("#6b7280".to_string()),
            font_size: Some(13),
            ..Default::default()
        },
    }
}

fn button(text: &str, url: String) -> ContentBlock {
    ContentBlock::Button {
        text: text.to_string(),
        url,
        style: BlockStyle::default(),
    }
}
