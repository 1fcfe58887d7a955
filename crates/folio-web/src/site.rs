#![forbid(unsafe_code)]

//! Site identifier namespace: sections, nav items, social links.
//!
//! This is the only contract between the page logic and the static markup.
//! Links are opaque strings; nothing here validates or rewrites them.

use folio_tracker::{ElementId, SectionId};

const TAGLINE: &str =
    "Full-stack developer passionate about creating elegant solutions to complex problems";

/// Where a nav bar entry leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Smooth-scroll to a section on this page.
    Section(SectionId),
    /// Navigate away to another route (e.g. `/blog`).
    Route(String),
}

/// A nav bar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Visible label.
    pub label: String,
    /// Scroll or route target.
    pub target: NavTarget,
    /// Rendered with the accent style (the resume button).
    pub accent: bool,
}

impl NavLink {
    fn section(label: &str, section: &str) -> Self {
        Self {
            label: label.to_owned(),
            target: NavTarget::Section(SectionId::from(section)),
            accent: false,
        }
    }

    fn route(label: &str, href: &str) -> Self {
        Self {
            label: label.to_owned(),
            target: NavTarget::Route(href.to_owned()),
            accent: false,
        }
    }

    /// The section this entry scrolls to, if it stays on the page.
    #[must_use]
    pub fn section_target(&self) -> Option<&SectionId> {
        match &self.target {
            NavTarget::Section(id) => Some(id),
            NavTarget::Route(_) => None,
        }
    }
}

/// Which social affordance a link is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialKind {
    /// LinkedIn profile.
    LinkedIn,
    /// GitHub profile.
    GitHub,
    /// Personal email.
    Email,
    /// School email.
    SchoolEmail,
    /// Phone number.
    Phone,
    /// Resume PDF.
    Resume,
}

impl SocialKind {
    /// Notification shown after copying this link's value.
    #[must_use]
    pub const fn copied_message(self) -> &'static str {
        match self {
            Self::Email | Self::SchoolEmail => "Email copied to clipboard!",
            Self::Phone => "Phone number copied to clipboard!",
            Self::LinkedIn | Self::GitHub | Self::Resume => "Link copied to clipboard!",
        }
    }
}

/// A social link revealed at the end of the intro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    /// Affordance kind.
    pub kind: SocialKind,
    /// Opaque href (`https:`, `mailto:`, `tel:` or a site path).
    pub href: String,
    /// Value placed on the clipboard by the copy affordance, if any.
    pub copy_value: Option<String>,
    /// Whether the link opens in a new tab.
    pub external: bool,
}

/// Static site content the page logic needs to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Full name revealed after loading.
    pub name: String,
    /// Logo text in the nav bar.
    pub monogram: String,
    /// Tagline typed after the name reveal.
    pub tagline: String,
    /// About-section portrait.
    pub portrait_src: String,
    /// Shown instead of the portrait if it fails to load.
    pub portrait_placeholder: String,
    /// Page sections in document order.
    pub sections: Vec<SectionId>,
    /// Nav bar entries.
    pub nav: Vec<NavLink>,
    /// Social links in display order.
    pub socials: Vec<SocialLink>,
    /// Reveal-on-scroll elements and the section each lives in.
    pub reveal_elements: Vec<(SectionId, ElementId)>,
}

impl Default for Site {
    fn default() -> Self {
        let sections: Vec<SectionId> = [
            "home",
            "about",
            "experience",
            "projects",
            "skills",
            "contact",
            "resume",
        ]
        .into_iter()
        .map(SectionId::from)
        .collect();

        let mut resume = NavLink::section("Resume", "resume");
        resume.accent = true;
        let nav = vec![
            NavLink::section("About", "about"),
            NavLink::section("Experience", "experience"),
            NavLink::section("Projects", "projects"),
            NavLink::section("Skills", "skills"),
            NavLink::route("Blog", "/blog"),
            NavLink::section("Contact", "contact"),
            resume,
        ];

        let socials = vec![
            SocialLink {
                kind: SocialKind::LinkedIn,
                href: "https://linkedin.com/in/yourprofile".to_owned(),
                copy_value: None,
                external: true,
            },
            SocialLink {
                kind: SocialKind::GitHub,
                href: "https://github.com/yourusername".to_owned(),
                copy_value: None,
                external: true,
            },
            SocialLink {
                kind: SocialKind::Email,
                href: "mailto:your.email@example.com".to_owned(),
                copy_value: Some("your.email@example.com".to_owned()),
                external: false,
            },
            SocialLink {
                kind: SocialKind::SchoolEmail,
                href: "mailto:ddhulipudi3@gatech.edu".to_owned(),
                copy_value: Some("ddhulipudi3@gatech.edu".to_owned()),
                external: false,
            },
            SocialLink {
                kind: SocialKind::Phone,
                href: "tel:+1234567890".to_owned(),
                copy_value: Some("+1234567890".to_owned()),
                external: false,
            },
            SocialLink {
                kind: SocialKind::Resume,
                href: "/resume.pdf".to_owned(),
                copy_value: None,
                external: true,
            },
        ];

        // Every content section below the hero has a heading and a body
        // that fade in on first sight.
        let reveal_elements = sections
            .iter()
            .skip(1)
            .flat_map(|section| {
                ["heading", "body"].into_iter().map(move |part| {
                    (
                        section.clone(),
                        ElementId::new(format!("{section}-{part}")),
                    )
                })
            })
            .collect();

        Self {
            name: "Dhruvsai Dhulipudi".to_owned(),
            monogram: "DD".to_owned(),
            tagline: TAGLINE.to_owned(),
            portrait_src: "/profile.jpg".to_owned(),
            portrait_placeholder: "/placeholder.svg".to_owned(),
            sections,
            nav,
            socials,
            reveal_elements,
        }
    }
}

impl Site {
    /// First link of the given kind.
    #[must_use]
    pub fn social(&self, kind: SocialKind) -> Option<&SocialLink> {
        self.socials.iter().find(|s| s.kind == kind)
    }

    /// Section nav targets that are not listed as sections. Route links
    /// leave the page and are never dangling.
    pub fn dangling_nav_targets(&self) -> impl Iterator<Item = &SectionId> {
        self.nav
            .iter()
            .filter_map(NavLink::section_target)
            .filter(|id| !self.sections.contains(id))
    }

    /// Reveal elements housed in `section`.
    pub fn reveal_elements_in<'a>(
        &'a self,
        section: &'a SectionId,
    ) -> impl Iterator<Item = &'a ElementId> + 'a {
        self.reveal_elements
            .iter()
            .filter(move |(s, _)| s == section)
            .map(|(_, id)| id)
    }
}
