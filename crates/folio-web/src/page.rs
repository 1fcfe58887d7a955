#![forbid(unsafe_code)]

//! Host-driven page view.
//!
//! [`PageView`] owns one intro sequencer, the two scroll observers and the
//! copy notifier, and routes host input to them. Nothing here reads a wall
//! clock or spawns a thread: the host (a browser shim, or a test) drives it.
//!
//! 1. [`PageView::mount`]: acquire the scroll lock and start autoplay.
//! 2. [`PageView::advance_to`]: feed host time each frame.
//! 3. [`PageView::on_scroll`] / [`PageView::on_intersection`]: forward
//!    observer events (ignored until the intro is `Complete`).
//! 4. [`PageView::teardown`] (or drop): cancel every timer, disconnect the
//!    observers and give scrolling back.
//!
//! # Example
//!
//! ```ignore
//! let mut page = PageView::mount(host, PageConfig::default())?;
//! page.advance_to(Duration::from_millis(16));
//! page.skip();
//! page.advance_to(Duration::from_millis(1300));
//! assert!(page.nav_visible());
//! ```

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use folio_core::animation::Animation;
use folio_core::clock::DeterministicClock;
use folio_intro::{
    AnimationStage, Cue, IntroConfig, IntroSequencer, ScrollControl, SkipButton, Transition,
    Typewriter, TypewriterConfig, WordCloud, WordCloudConfig, WordStyle,
};
use folio_tracker::{
    ActiveSectionTracker, Clipboard, CopyNotifier, ElementId, ImageSlot, NoticeKind, Notification,
    NotifierConfig, RevealConfig, RevealSet, RevealTracker, SectionId, SectionLayout,
    TrackerConfig, TrackerError,
};

use crate::site::{Site, SocialKind};
use crate::trace::IntroTrace;

/// Everything the page needs from the browser.
///
/// Blanket-implemented for any type that provides the three capabilities.
pub trait Host: ScrollControl + Clipboard + SectionLayout {}

impl<T: ScrollControl + Clipboard + SectionLayout> Host for T {}

/// Page configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Static content and identifier namespace.
    pub site: Site,
    /// Stage tables and aurora crossfade.
    pub intro: IntroConfig,
    /// Loading overlay word cloud.
    pub word_cloud: WordCloudConfig,
    /// Tagline typewriter.
    pub typewriter: TypewriterConfig,
    /// Scroll spy.
    pub tracker: TrackerConfig,
    /// Reveal-on-scroll.
    pub reveal: RevealConfig,
    /// Copy notifications.
    pub notifier: NotifierConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            site: Site::default(),
            intro: IntroConfig::default(),
            word_cloud: WordCloudConfig::default(),
            typewriter: TypewriterConfig::default(),
            tracker: TrackerConfig::default(),
            reveal: RevealConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }
}

impl PageConfig {
    /// Replace the site content.
    #[must_use]
    pub fn with_site(mut self, site: Site) -> Self {
        self.site = site;
        self
    }

    /// Replace the intro configuration.
    #[must_use]
    pub fn with_intro(mut self, intro: IntroConfig) -> Self {
        self.intro = intro;
        self
    }

    /// Seed the word cloud.
    ///
    /// The default seed is 0, so without this call every mount lays the
    /// cloud out identically. Browser hosts should pass something that
    /// changes per page load (a timestamp or `crypto.getRandomValues`);
    /// tests and trace replays pass a constant. The seed is recorded in the
    /// trace header.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.word_cloud = self.word_cloud.with_seed(seed);
        self
    }
}

/// Errors from [`PageView::mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The section list is unusable for the scroll spy.
    Sections(TrackerError),
    /// A nav item targets a section the site does not list.
    UnknownNavTarget(SectionId),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sections(e) => write!(f, "invalid sections: {e}"),
            Self::UnknownNavTarget(id) => write!(f, "nav item targets unknown section {id}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sections(e) => Some(e),
            Self::UnknownNavTarget(_) => None,
        }
    }
}

impl From<TrackerError> for PageError {
    fn from(e: TrackerError) -> Self {
        Self::Sections(e)
    }
}

/// Result of a single [`PageView::advance_to`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Intro cues applied during this frame.
    pub cues_applied: usize,
    /// Stage after the frame.
    pub stage: AnimationStage,
    /// Whether the page became interactive during this frame.
    pub became_interactive: bool,
}

/// The single-page portfolio view.
pub struct PageView<H: Host + 'static> {
    host: Rc<H>,
    site: Site,
    clock: DeterministicClock,
    intro: IntroSequencer,
    word_cloud: WordCloud,
    typewriter_config: TypewriterConfig,
    typewriter: Option<Typewriter>,
    spy: ActiveSectionTracker,
    reveals: RevealTracker,
    notifier: CopyNotifier,
    portrait: ImageSlot,
    trace: IntroTrace,
    scroll_offset: f64,
    interactive: bool,
    torn_down: bool,
}

impl<H: Host + 'static> fmt::Debug for PageView<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageView")
            .field("now", &self.clock.now())
            .field("stage", &self.intro.stage())
            .field("interactive", &self.interactive)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> PageView<H> {
    /// Mount the page at host time zero and start the intro autoplay.
    ///
    /// # Errors
    ///
    /// [`PageError`] if the site's sections or nav items are inconsistent.
    pub fn mount(host: Rc<H>, config: PageConfig) -> Result<Self, PageError> {
        let PageConfig {
            site,
            intro,
            word_cloud,
            typewriter,
            tracker,
            reveal,
            notifier,
        } = config;

        if let Some(id) = site.dangling_nav_targets().next() {
            return Err(PageError::UnknownNavTarget(id.clone()));
        }
        let spy = ActiveSectionTracker::new(site.sections.clone(), tracker)?;

        let trace = IntroTrace::new(word_cloud.seed);
        let portrait = ImageSlot::new(&*site.portrait_src, &*site.portrait_placeholder);
        let surface: Rc<dyn ScrollControl> = host.clone();
        let mut page = Self {
            host,
            site,
            clock: DeterministicClock::new(),
            intro: IntroSequencer::new(intro, surface),
            word_cloud: WordCloud::new(word_cloud),
            typewriter_config: typewriter,
            typewriter: None,
            spy,
            reveals: RevealTracker::new(reveal),
            notifier: CopyNotifier::new(notifier),
            portrait,
            trace,
            scroll_offset: 0.0,
            interactive: false,
            torn_down: false,
        };
        page.intro.start();
        page.absorb_transitions();
        tracing::info!(sections = page.site.sections.len(), "page mounted");
        Ok(page)
    }

    /// Feed host time (since mount). Time that runs backwards is ignored.
    pub fn advance_to(&mut self, now: Duration) -> FrameReport {
        let was_interactive = self.interactive;
        if self.torn_down {
            return self.report(0, was_interactive);
        }
        let dt = self.clock.set(now);
        let now = self.clock.now();

        // A typewriter created during this frame is caught up from its
        // own cue time; one that already existed just takes the frame delta.
        let typing_before = self.typewriter.is_some();
        let applied = self.intro.advance_to(now);
        self.absorb_transitions();
        if typing_before && let Some(tw) = self.typewriter.as_mut() {
            tw.tick(dt);
        }
        self.notifier.advance_to(now);
        self.report(applied, was_interactive)
    }

    /// Advance host time by `dt`.
    pub fn advance(&mut self, dt: Duration) -> FrameReport {
        let now = self.clock.now().saturating_add(dt);
        self.advance_to(now)
    }

    /// The skip button was pressed.
    pub fn skip(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let skipped = self.intro.skip();
        self.absorb_transitions();
        skipped
    }

    /// The document scrolled to `offset` pixels.
    ///
    /// Returns `true` if the active section changed. Ignored until the page
    /// is interactive; the offset is still remembered for activation.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.scroll_offset = offset;
        if self.torn_down || !self.interactive {
            return false;
        }
        self.spy.on_scroll(offset, &*self.host)
    }

    /// An intersection entry for element `id` with visible `ratio`.
    ///
    /// Returns `true` if the element was revealed by this entry.
    pub fn on_intersection(&mut self, id: &str, ratio: f32) -> bool {
        if self.torn_down {
            return false;
        }
        self.reveals.on_intersection(id, ratio)
    }

    /// Start observing an element added after the page became interactive.
    pub fn observe_element(&mut self, id: impl Into<ElementId>) -> bool {
        if self.torn_down || !self.interactive {
            return false;
        }
        self.reveals.register(id)
    }

    /// Element `id` left the document; stop observing it.
    pub fn on_element_removed(&mut self, id: &str) -> bool {
        self.reveals.unregister(id)
    }

    /// Copy `text` and flash `message` (or the failure message).
    ///
    /// Returns `None` after teardown.
    pub fn copy(&mut self, text: &str, message: &str) -> Option<NoticeKind> {
        if self.torn_down {
            return None;
        }
        Some(self.notifier.copy(&*self.host, text, message))
    }

    /// Copy the value behind a social link, if it has one.
    pub fn copy_social(&mut self, kind: SocialKind) -> Option<NoticeKind> {
        let value = self.site.social(kind)?.copy_value.clone()?;
        self.copy(&value, kind.copied_message())
    }

    /// The portrait failed to load. Returns `true` if the placeholder was
    /// swapped in by this call.
    pub fn on_portrait_error(&mut self) -> bool {
        !self.torn_down && self.portrait.on_error()
    }

    /// Cancel every timer, disconnect both observers and restore scrolling.
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.intro.teardown();
        self.spy.disconnect();
        let observed = self.reveals.disconnect();
        self.notifier.teardown();
        tracing::info!(
            stage = %self.intro.stage(),
            observed,
            "page torn down"
        );
    }

    // ---- observation --------------------------------------------------

    /// Host time of the last frame.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Current intro stage.
    #[must_use]
    pub fn stage(&self) -> AnimationStage {
        self.intro.stage()
    }

    /// The intro sequencer.
    #[must_use]
    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    /// Site content.
    #[must_use]
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Whether content, nav and observers are live (intro reached `Complete`).
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether the nav bar is mounted.
    #[must_use]
    pub fn nav_visible(&self) -> bool {
        self.interactive && !self.torn_down
    }

    /// Whether [`PageView::teardown`] ran.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether user scrolling is currently suppressed.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.intro.scroll_locked()
    }

    /// Word cloud styles while the loading overlay is on screen.
    ///
    /// The cloud is generated on the first call and frozen afterwards.
    #[must_use]
    pub fn word_cloud(&self) -> Option<&[WordStyle]> {
        if self.intro.loading_overlay_opacity() <= 0.0 || self.torn_down {
            return None;
        }
        Some(self.word_cloud.styles())
    }

    /// Loading overlay opacity.
    #[must_use]
    pub fn loading_overlay_opacity(&self) -> f32 {
        self.intro.loading_overlay_opacity()
    }

    /// Skip button presentation.
    #[must_use]
    pub fn skip_button(&self) -> SkipButton {
        self.intro.skip_button()
    }

    /// Opacities of the plain and aurora name layers.
    #[must_use]
    pub fn name_layer_opacities(&self) -> (f32, f32) {
        self.intro.name_layer_opacities()
    }

    /// Whether the name is on screen.
    #[must_use]
    pub fn name_visible(&self) -> bool {
        self.intro.stage() >= AnimationStage::NameRevealed
    }

    /// Tagline prefix typed so far, once typing has started.
    #[must_use]
    pub fn typed_tagline(&self) -> Option<&str> {
        self.typewriter.as_ref().map(Typewriter::visible_text)
    }

    /// Whether the typewriter caret is drawn this frame.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.typewriter
            .as_ref()
            .is_some_and(Typewriter::caret_visible)
    }

    /// Whether the social links are on screen.
    #[must_use]
    pub fn socials_visible(&self) -> bool {
        self.intro.stage() == AnimationStage::SocialsShown
    }

    /// Highlighted nav section.
    #[must_use]
    pub fn active_section(&self) -> Option<&SectionId> {
        self.spy.active()
    }

    /// Whether element `id` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveals.is_revealed(id)
    }

    /// All revealed elements.
    #[must_use]
    pub fn revealed(&self) -> &RevealSet {
        self.reveals.revealed()
    }

    /// The copy notification on screen, if any.
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    /// Source the portrait `<img>` should point at.
    #[must_use]
    pub fn portrait_src(&self) -> &str {
        self.portrait.current_src()
    }

    /// Cues applied so far.
    #[must_use]
    pub fn trace(&self) -> &IntroTrace {
        &self.trace
    }

    // ---- internals ----------------------------------------------------

    fn report(&self, cues_applied: usize, was_interactive: bool) -> FrameReport {
        FrameReport {
            cues_applied,
            stage: self.intro.stage(),
            became_interactive: self.interactive && !was_interactive,
        }
    }

    fn absorb_transitions(&mut self) {
        for transition in self.intro.drain_transitions() {
            self.trace.record(&transition);
            self.on_transition(transition);
        }
    }

    fn on_transition(&mut self, transition: Transition) {
        match transition.cue {
            Cue::Advance(AnimationStage::Complete) => self.become_interactive(),
            Cue::Advance(AnimationStage::TypingShown) => {
                let mut tw = Typewriter::new(
                    self.site.tagline.clone(),
                    self.typewriter_config.clone(),
                );
                tw.tick(self.clock.now().saturating_sub(transition.at));
                self.typewriter = Some(tw);
            }
            _ => {}
        }
    }

    fn become_interactive(&mut self) {
        self.interactive = true;
        let active = self.spy.activate(self.scroll_offset, &*self.host).clone();
        let mut registered = 0;
        for (_, id) in &self.site.reveal_elements {
            if self.reveals.register(id.clone()) {
                registered += 1;
            }
        }
        tracing::debug!(%active, registered, "page interactive");
    }
}

impl<H: Host + 'static> Drop for PageView<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_tracker::{ClipboardError, SectionBounds};
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[derive(Default)]
    struct FakeHost {
        scroll_enabled: Cell<bool>,
        clipboard: RefCell<Vec<String>>,
        deny_clipboard: Cell<bool>,
        layout: RefCell<BTreeMap<SectionId, SectionBounds>>,
    }

    impl FakeHost {
        fn with_layout() -> Rc<Self> {
            let host = Self {
                scroll_enabled: Cell::new(true),
                ..Self::default()
            };
            let mut top = 0.0;
            for id in Site::default().sections {
                host.layout
                    .borrow_mut()
                    .insert(id, SectionBounds::new(top, 800.0));
                top += 800.0;
            }
            Rc::new(host)
        }
    }

    impl ScrollControl for FakeHost {
        fn set_scroll_enabled(&self, enabled: bool) {
            self.scroll_enabled.set(enabled);
        }
    }

    impl Clipboard for FakeHost {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.deny_clipboard.get() {
                return Err(ClipboardError::Denied);
            }
            self.clipboard.borrow_mut().push(text.to_owned());
            Ok(())
        }
    }

    impl SectionLayout for FakeHost {
        fn bounds(&self, id: &SectionId) -> Option<SectionBounds> {
            self.layout.borrow().get(id).copied()
        }
    }

    #[test]
    fn mount_locks_scroll_and_shows_word_cloud() {
        let host = FakeHost::with_layout();
        let page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        assert!(!host.scroll_enabled.get());
        assert_eq!(page.stage(), AnimationStage::Loading);
        assert_eq!(page.word_cloud().map(<[WordStyle]>::len), Some(50));
        assert!(!page.nav_visible());
        assert_eq!(page.active_section(), None);
    }

    #[test]
    fn complete_activates_trackers_and_unlocks_scroll() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        page.advance_to(ms(6499));
        assert!(!page.nav_visible());
        let report = page.advance_to(ms(6500));
        assert!(report.became_interactive);
        assert_eq!(report.stage, AnimationStage::Complete);
        assert!(host.scroll_enabled.get());
        assert_eq!(page.active_section().map(SectionId::as_str), Some("home"));
        assert!(page.word_cloud().is_none());
    }

    #[test]
    fn scroll_before_interactive_is_remembered_not_tracked() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host, PageConfig::default()).unwrap();
        // 1700 + 100 nav offset lands in the third section.
        assert!(!page.on_scroll(1700.0));
        assert_eq!(page.active_section(), None);
        page.advance_to(ms(6500));
        assert_eq!(
            page.active_section().map(SectionId::as_str),
            Some("experience")
        );
        assert!(page.on_scroll(0.0));
        assert_eq!(page.active_section().map(SectionId::as_str), Some("home"));
    }

    #[test]
    fn typewriter_starts_at_its_cue() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host, PageConfig::default()).unwrap();
        page.advance_to(ms(10_299));
        assert_eq!(page.typed_tagline(), None);
        // TypingShown is due at 10300; 160ms later two graphemes are typed.
        page.advance_to(ms(10_460));
        assert_eq!(page.typed_tagline(), Some("Fu"));
        page.advance(ms(80));
        assert_eq!(page.typed_tagline(), Some("Ful"));
    }

    #[test]
    fn skip_reaches_socials_quickly() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        page.advance_to(ms(200));
        assert!(page.skip());
        assert_eq!(page.stage(), AnimationStage::FadingOut);
        page.advance_to(ms(1000));
        assert!(page.nav_visible());
        page.advance_to(ms(1529));
        assert!(!page.socials_visible());
        page.advance_to(ms(1530));
        assert!(page.socials_visible());
        assert!(host.scroll_enabled.get());
    }

    #[test]
    fn reveal_registered_at_complete() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host, PageConfig::default()).unwrap();
        assert!(!page.on_intersection("about-heading", 1.0));
        page.skip();
        page.advance_to(ms(800));
        assert!(page.on_intersection("about-heading", 0.5));
        assert!(page.is_revealed("about-heading"));
        assert!(!page.on_intersection("about-heading", 0.0));
        assert!(page.is_revealed("about-heading"));
    }

    #[test]
    fn copy_social_uses_link_value() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        assert_eq!(
            page.copy_social(SocialKind::SchoolEmail),
            Some(NoticeKind::Success)
        );
        assert_eq!(
            host.clipboard.borrow().as_slice(),
            ["ddhulipudi3@gatech.edu".to_owned()]
        );
        assert_eq!(
            page.notification().map(|n| n.text.as_str()),
            Some("Email copied to clipboard!")
        );
        assert_eq!(page.copy_social(SocialKind::GitHub), None);
    }

    #[test]
    fn teardown_restores_scroll_and_stops_everything() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        page.teardown();
        assert!(host.scroll_enabled.get());
        assert_eq!(page.advance_to(ms(20_000)).cues_applied, 0);
        assert_eq!(page.stage(), AnimationStage::Loading);
        assert!(!page.skip());
        assert_eq!(page.copy("x", "y"), None);
        assert!(page.trace().is_empty());
    }

    #[test]
    fn drop_restores_scroll() {
        let host = FakeHost::with_layout();
        let page = PageView::mount(host.clone(), PageConfig::default()).unwrap();
        assert!(!host.scroll_enabled.get());
        drop(page);
        assert!(host.scroll_enabled.get());
    }

    #[test]
    fn portrait_falls_back_once() {
        let host = FakeHost::with_layout();
        let mut page = PageView::mount(host, PageConfig::default()).unwrap();
        assert_eq!(page.portrait_src(), "/profile.jpg");
        assert!(page.on_portrait_error());
        assert!(!page.on_portrait_error());
        assert_eq!(page.portrait_src(), "/placeholder.svg");
    }

    #[test]
    fn word_cloud_layout_follows_the_seed() {
        let css = |config: PageConfig| -> Vec<String> {
            let page = PageView::mount(FakeHost::with_layout(), config).unwrap();
            let styles: Vec<String> = page
                .word_cloud()
                .unwrap()
                .iter()
                .map(|w| w.inline_css())
                .collect();
            styles
        };
        // Unseeded mounts repeat themselves.
        assert_eq!(css(PageConfig::default()), css(PageConfig::default()));
        assert_eq!(css(PageConfig::default()), css(PageConfig::default().with_seed(0)));
        assert_ne!(css(PageConfig::default()), css(PageConfig::default().with_seed(7)));
        let config = PageConfig::default().with_seed(7);
        let page = PageView::mount(FakeHost::with_layout(), config).unwrap();
        assert_eq!(page.trace().seed(), 7);
    }

    #[test]
    fn mount_rejects_dangling_nav() {
        let mut site = Site::default();
        site.sections.retain(|s| s.as_str() != "resume");
        let err = PageView::mount(
            FakeHost::with_layout(),
            PageConfig::default().with_site(site),
        )
        .unwrap_err();
        assert_eq!(err, PageError::UnknownNavTarget(SectionId::from("resume")));
    }
}
