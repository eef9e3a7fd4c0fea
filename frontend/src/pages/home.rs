use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::header::{scroll_to_section, Header};
use crate::components::parallax::ParallaxSection;
use crate::components::reveal::{reveal_style, Direction, FadeIn, ScaleIn, ScrollReveal};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, TextArea, TextInput};
use crate::hooks::use_reduced_motion;

const HERO_WORDS: [&str; 3] = ["60 Minute", "Fastest", "Most Efficient"];

const FEATURES: [(&str, &str, &str); 6] = [
    ("🚀", "Innovative Solutions", "Cutting-edge technology solutions tailored to your business needs"),
    ("👥", "Expert Team", "Experienced professionals dedicated to your success"),
    ("📊", "Data-Driven", "Make informed decisions with powerful analytics and insights"),
    ("📈", "Scalable Growth", "Solutions that grow with your business at every stage"),
    ("⚡", "24/7 Support", "Round-the-clock support to keep your business running smoothly"),
    ("🔒", "Security First", "Enterprise-grade security to protect your valuable data"),
];

const VALUES: [(&str, &str); 4] = [
    ("Innovation", "Pushing boundaries to deliver cutting-edge solutions"),
    ("Integrity", "Building trust through transparency and honesty"),
    ("Excellence", "Committed to delivering exceptional quality"),
    ("Collaboration", "Working together to achieve shared success"),
];

fn next_word(index: usize) -> usize {
    (index + 1) % HERO_WORDS.len()
}

/// Time each word stays on screen before it slides away.
const WORD_HOLD_MS: u32 = 2000;
/// Length of each half of the word swap.
const WORD_SLIDE_MS: u32 = 300;
/// How long the page waits before playing the title entrance, so the hidden
/// pose gets painted first.
const ENTRANCE_DELAY_MS: u32 = 50;
const TITLE_ENTRANCE_MS: u32 = 1000;
const CTA_ENTRANCE_MS: u32 = 600;
/// The call to action starts before the title has finished.
const CTA_OVERLAP_MS: u32 = 400;

const UNDERLINE_PATH: &str = "M0,5 Q10,2 20,5 T40,5 T60,5 T80,5 T100,5 T120,5 T140,5 T160,5 T180,5 T200,5";

/// The rotating word in the hero title. The word slides out to the right,
/// swaps, and the next one slides in from the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSlot {
    pub index: usize,
    pub leaving: bool,
}

impl WordSlot {
    pub fn first() -> Self {
        Self { index: 0, leaving: false }
    }

    pub fn leave(self) -> Self {
        Self { leaving: true, ..self }
    }

    pub fn swap(self) -> Self {
        Self { index: next_word(self.index), leaving: false }
    }

    pub fn word(self) -> &'static str {
        HERO_WORDS[self.index]
    }

    /// Class driving the slide. Entering is a keyframe animation replayed by
    /// re-keying the span; leaving is a transition on the existing span.
    pub fn class(self) -> &'static str {
        if self.leaving {
            "hero-word hero-word-leave"
        } else {
            "hero-word hero-word-enter"
        }
    }
}

/// When the call to action begins its entrance, relative to the title.
pub fn cta_delay_ms() -> u32 {
    TITLE_ENTRANCE_MS.saturating_sub(CTA_OVERLAP_MS)
}

#[derive(Properties, PartialEq)]
struct HighlightProps {
    label: AttrValue,
    onhover: Callback<bool>,
}

/// A hoverable word with a wavy underline.
#[function_component(Highlight)]
fn highlight(props: &HighlightProps) -> Html {
    let onmouseenter = props.onhover.reform(|_: MouseEvent| true);
    let onmouseleave = props.onhover.reform(|_: MouseEvent| false);

    html! {
        <span class="hero-highlight float-subtle" {onmouseenter} {onmouseleave}>
            { &*props.label }
            <svg class="hero-underline" viewBox="0 0 200 10" preserveAspectRatio="none">
                <path d={UNDERLINE_PATH} stroke="#078236" stroke-width="2" fill="none" class="animate-dash" />
            </svg>
        </span>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    let word = use_state(WordSlot::first);
    let entered = use_state(|| false);
    let factory = use_state(|| false);
    let retail = use_state(|| false);
    let reduced = use_reduced_motion();

    {
        let word = word.clone();
        use_effect_with_deps(
            move |_| {
                let swap: Rc<RefCell<Option<Timeout>>> = Rc::default();
                let mut current = WordSlot::first();
                let interval = {
                    let swap = swap.clone();
                    Interval::new(WORD_HOLD_MS, move || {
                        word.set(current.leave());
                        current = current.swap();
                        let word = word.clone();
                        let next = current;
                        *swap.borrow_mut() = Some(Timeout::new(WORD_SLIDE_MS, move || word.set(next)));
                    })
                };
                move || {
                    drop(interval);
                    swap.borrow_mut().take();
                }
            },
            (),
        );
    }

    {
        let entered = entered.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(ENTRANCE_DELAY_MS, move || entered.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    let on_factory = {
        let factory = factory.clone();
        Callback::from(move |hovered: bool| factory.set(hovered))
    };
    let on_retail = {
        let retail = retail.clone();
        Callback::from(move |hovered: bool| retail.set(hovered))
    };

    let title_style = reveal_style("translateY(30px)", *entered, reduced, 0, TITLE_ENTRANCE_MS);
    let cta_style = reveal_style("translateY(20px)", *entered, reduced, cta_delay_ms(), CTA_ENTRANCE_MS);

    html! {
        <section id="hero" class="hero">
            <ParallaxSection class="hero-background" speed={0.3}>
                <video class="hero-video" autoplay=true loop=true muted=true playsinline=true preload="auto">
                    <source src="/videos/hero-background.webm" type="video/webm" />
                    <source src="/videos/hero-background.mp4" type="video/mp4" />
                </video>
            </ParallaxSection>
            <div class={classes!("hero-overlay", "hero-overlay-left", (*factory).then_some("cleared"))}></div>
            <div class={classes!("hero-overlay", "hero-overlay-right", (*retail).then_some("cleared"))}></div>
            <div class="hero-top">
                <h1 class="hero-title" style={title_style}>
                    {"India's "}
                    <span class="animated-gradient">
                        <span key={word.word()} class={word.class()}>{word.word()}</span>
                    </span>
                    <br />
                    <Highlight label="Factory" onhover={on_factory} />
                    {" to "}
                    <Highlight label="Retail" onhover={on_retail} />
                    <br />
                    {"Supply Chain"}
                </h1>
            </div>
            <div class="hero-bottom">
                <img class="hero-mascot" src="/images/bijnis_mascot.png" alt="Bijnis Mascot" />
                <div class="hero-cta-group" style={cta_style}>
                    <Button
                        size={ButtonSize::Large}
                        variant={ButtonVariant::Outline}
                        magnetic=true
                        class="hero-cta"
                        onclick={Callback::from(|_: MouseEvent| scroll_to_section("features"))}
                    >
                        {"Learn More"}
                    </Button>
                </div>
                <div class="scroll-indicator" aria-hidden="true">
                    <div class="scroll-indicator-dot"></div>
                </div>
            </div>
        </section>
    }
}

#[function_component(Features)]
fn features() -> Html {
    html! {
        <section id="features" class="section section-dark">
            <FadeIn class="section-heading">
                <h2>{"Why Choose Bijnis"}</h2>
                <p>{"Comprehensive solutions designed to accelerate your business growth"}</p>
            </FadeIn>
            <ScrollReveal stagger_ms={150} class="feature-grid">
                { for FEATURES.iter().map(|(icon, title, description)| html! {
                    <Card class="feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p>{*description}</p>
                    </Card>
                }) }
            </ScrollReveal>
        </section>
    }
}

#[function_component(About)]
fn about() -> Html {
    html! {
        <section id="about" class="section section-deep">
            <div class="about-grid">
                <FadeIn direction={Direction::Left}>
                    <h2>{"Our Story"}</h2>
                    <p>{"Founded with a vision to revolutionize the business landscape, Bijnis has been at the forefront of innovation for years."}</p>
                    <p>{"We believe in empowering businesses with cutting-edge solutions that drive real results. Our team works to understand your unique challenges and deliver tailored solutions."}</p>
                    <p>{"From startups to enterprises, we've helped hundreds of businesses transform their operations and grow."}</p>
                </FadeIn>
                <ScaleIn>
                    <div class="about-panel">
                        <div class="about-icon">{"💼"}</div>
                        <p>{"Your Success, Our Mission"}</p>
                    </div>
                </ScaleIn>
            </div>
        </section>
    }
}

#[function_component(Mission)]
fn mission() -> Html {
    html! {
        <section id="mission" class="section section-dark">
            <FadeIn class="section-heading">
                <h2>{"Our Mission"}</h2>
                <p>{"To empower businesses worldwide with innovative solutions that drive growth, efficiency, and lasting success"}</p>
            </FadeIn>
            <div class="values-grid">
                { for VALUES.iter().enumerate().map(|(index, (title, description))| html! {
                    <FadeIn delay_ms={index as u32 * 100}>
                        <div class="value">
                            <h3>{*title}</h3>
                            <p>{*description}</p>
                        </div>
                    </FadeIn>
                }) }
            </div>
        </section>
    }
}

#[function_component(Blog)]
fn blog() -> Html {
    html! {
        <section id="blog" class="section section-deep">
            <h2 class="centered">{"Latest Insights"}</h2>
            <p class="centered muted">{"Blog content coming soon..."}</p>
        </section>
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactProblem {
    MissingName,
    InvalidEmail,
    MissingMessage,
}

impl ContactProblem {
    pub fn message(self) -> &'static str {
        match self {
            ContactProblem::MissingName => "Please tell us your name.",
            ContactProblem::InvalidEmail => "Please enter a valid email address.",
            ContactProblem::MissingMessage => "Please write a short message.",
        }
    }
}

/// Local checks only; the form is not sent anywhere.
pub fn validate_contact(draft: &ContactDraft) -> Result<(), ContactProblem> {
    if draft.name.trim().is_empty() {
        return Err(ContactProblem::MissingName);
    }
    let email = draft.email.trim();
    let valid_email = match email.split_once('@') {
        Some((user, domain)) => !user.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid_email {
        return Err(ContactProblem::InvalidEmail);
    }
    if draft.message.trim().is_empty() {
        return Err(ContactProblem::MissingMessage);
    }
    Ok(())
}

#[function_component(Contact)]
fn contact() -> Html {
    let draft = use_state(ContactDraft::default);
    let problem = use_state(|| None::<ContactProblem>);
    let sent = use_state(|| false);

    let on_name = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ContactDraft { name: input.value(), ..(*draft).clone() });
        })
    };
    let on_email = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ContactDraft { email: input.value(), ..(*draft).clone() });
        })
    };
    let on_message = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(ContactDraft { message: input.value(), ..(*draft).clone() });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let problem = problem.clone();
        let sent = sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_contact(&draft) {
                Ok(()) => {
                    problem.set(None);
                    sent.set(true);
                    draft.set(ContactDraft::default());
                }
                Err(p) => problem.set(Some(p)),
            }
        })
    };

    html! {
        <section id="contact" class="section section-dark">
            <div class="contact">
                <h2 class="centered">{"Get In Touch"}</h2>
                if *sent {
                    <p class="contact-thanks">{"Thanks! We'll be in touch soon."}</p>
                } else {
                    <form class="contact-form" onsubmit={on_submit}>
                        <TextInput placeholder="Your Name" value={draft.name.clone()} oninput={on_name} />
                        <TextInput kind="email" placeholder="Your Email" value={draft.email.clone()} oninput={on_email} />
                        <TextArea placeholder="Your Message" value={draft.message.clone()} oninput={on_message} />
                        if let Some(p) = *problem {
                            <p class="contact-problem">{p.message()}</p>
                        }
                        <Button kind="submit" class="full-width">{"Send Message"}</Button>
                    </form>
                }
            </div>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <p class="footer-brand">{"BIJNIS"}</p>
            <p class="muted">{"© 2025 Bijnis. All rights reserved."}</p>
        </footer>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <>
            <Header />
            <main class="page">
                <Hero />
                <Features />
                <About />
                <Mission />
                <Blog />
                <Contact />
            </main>
            <Footer />
        </>
    }
}
