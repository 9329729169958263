use serde::{Deserialize, Serialize};

/// A handler's reply: what to send, and whether only the invoker sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// What to send.
    pub directive: Directive,
    /// Visible to the invoking member only. Interactions only.
    #[serde(default)]
    pub ephemeral: bool,
}

impl Response {
    fn of(directive: Directive) -> Self {
        Self {
            directive,
            ephemeral: false,
        }
    }

    /// Plain text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self::of(Directive::Text {
            content: content.into(),
        })
    }

    /// Rich message reply.
    pub fn message(message: RichMessage) -> Self {
        Self::of(Directive::Message(message))
    }

    /// Reply with one or more embeds.
    pub fn embeds(embeds: impl IntoIterator<Item = Embed>) -> Self {
        Self::of(Directive::Embeds {
            embeds: embeds.into_iter().collect(),
        })
    }

    /// Open a modal form. Interactions only.
    pub fn modal(modal: Modal) -> Self {
        Self::of(Directive::Modal(modal))
    }

    /// Acknowledge now, reply later. Interactions only.
    pub fn defer() -> Self {
        Self::of(Directive::Defer)
    }

    /// Mark the reply ephemeral.
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }
}

/// Reply kinds a response sink understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Directive {
    /// Plain text.
    Text {
        /// Message body.
        content: String,
    },
    /// Text with attached embeds.
    Message(RichMessage),
    /// Embeds only.
    Embeds {
        /// Embeds, in display order.
        embeds: Vec<Embed>,
    },
    /// A modal form.
    Modal(Modal),
    /// Deferred acknowledgement.
    Defer,
}

impl Directive {
    /// Lower-case directive name, as serialized.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Text { .. } => "text",
            Directive::Message(_) => "message",
            Directive::Embeds { .. } => "embeds",
            Directive::Modal(_) => "modal",
            Directive::Defer => "defer",
        }
    }

    /// Whether a text-message channel can deliver this directive.
    pub fn fits_text_channel(&self) -> bool {
        !matches!(self, Directive::Modal(_) | Directive::Defer)
    }
}

/// A message with optional text and embeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichMessage {
    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attached embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

/// A rich embed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    /// Title line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Side-bar colour as `0xRRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Name/value fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the colour.
    pub fn color(mut self, rgb: u32) -> Self {
        self.color = Some(rgb);
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Value of the first field called `name`.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// One field of an [`Embed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Render beside the previous field.
    #[serde(default)]
    pub inline: bool,
}

/// A modal form request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modal {
    /// ID echoed back when the form is submitted.
    pub custom_id: String,
    /// Dialog title.
    pub title: String,
    /// Text inputs, in order.
    #[serde(default)]
    pub inputs: Vec<ModalInput>,
}

/// A text input inside a [`Modal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalInput {
    /// ID of the input within the form.
    pub custom_id: String,
    /// Label shown above the input.
    pub label: String,
}
