use crate::domain::models::{CopySource, EmailPurpose, GeneratedEmailContent};

pub fn fallback_email_content(purpose: EmailPurpose) -> GeneratedEmailContent {
    let (subject, content, preview_text) = match purpose {
        EmailPurpose::Welcome => (
            "Welcome! We're glad you're here",
            concat!(
                "<h2>Welcome aboard!</h2>",
                "<p>Thank you for joining us. We're excited to have you as part of our community.</p>",
                "<p>Over the next few days we'll send you tips and resources to help you get the most out of your membership.</p>",
                "<p>If you have any questions, just reply to this email. We're always happy to help.</p>",
                "<p>Best regards,<br>The Team</p>",
            ),
            "Thanks for joining. Here's what happens next.",
        ),
        EmailPurpose::Promotional => (
            "A special offer just for you",
            concat!(
                "<h2>Don't miss out!</h2>",
                "<p>For a limited time we're offering an exclusive deal to our valued subscribers.</p>",
                "<p>This is the perfect moment to take the next step. The offer won't last long.</p>",
                "<p><a href=\"#\" style=\"display: inline-block; padding: 12px 24px; background-color: #2563eb; color: #ffffff; text-decoration: none; border-radius: 6px;\">Claim your offer</a></p>",
                "<p>Best regards,<br>The Team</p>",
            ),
            "An exclusive, limited-time offer inside.",
        ),
        EmailPurpose::Newsletter => (
            "This week's highlights",
            concat!(
                "<h2>Here's what's new</h2>",
                "<p>We've gathered the most useful updates, tips, and stories from the past week.</p>",
                "<ul><li>Latest product updates</li><li>Tips to get better results</li><li>Stories from our community</li></ul>",
                "<p>Thanks for reading. See you next week!</p>",
                "<p>Best regards,<br>The Team</p>",
            ),
            "Updates, tips, and stories from this week.",
        ),
        EmailPurpose::General => (
            "An update from our team",
            concat!(
                "<p>Hello,</p>",
                "<p>We wanted to reach out with a quick update and thank you for being part of our community.</p>",
                "<p>If there's anything we can help you with, simply reply to this email.</p>",
                "<p>Best regards,<br>The Team</p>",
            ),
            "A quick update from our team.",
        ),
    };

    GeneratedEmailContent {
        subject: subject.to_string(),
        content: content.to_string(),
        preview_text: preview_text.to_string(),
        source: CopySource::Fallback,
    }
}
