use gloo::events::EventListener;
use gloo::net::http::Request;
use gloo::timers::callback::{Interval, Timeout};
use retrato_core::{
    fit_contain, Catalog, FitRect, GameSession, GuessOutcome, ImageRecord, Label, TickOutcome,
    ToRowCol, GRID_SIZE, REVEAL_INTERVAL_MS, ROUND_END_DELAY_MS, TILES,
};
use yew::prelude::*;

/// No image source responded with a well-formed list.
#[derive(Debug)]
pub(crate) struct LoadError;

const LOAD_ERROR_HELP: &str = "Could not load images.json. Make sure you are visiting the site \
    over http:// (not file://) and try a hard refresh.";

fn catalog_candidates() -> Vec<String> {
    let mut candidates = vec![
        "./sources/images.json".to_string(),
        "/sources/images.json".to_string(),
    ];
    if let Ok(origin) = gloo::utils::window().location().origin() {
        candidates.push(format!("{origin}/sources/images.json"));
    }
    candidates
}

/// Tries each candidate path in order; the first well-formed response wins.
/// An empty list still counts as loaded, the session just skips its rounds.
async fn fetch_catalog() -> Result<Catalog, LoadError> {
    for url in catalog_candidates() {
        // no-store: a stale cached catalog must not mask updates
        let request = Request::get(&url).cache(web_sys::RequestCache::NoStore);
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                log::debug!("{url}: {err}, trying next");
                continue;
            }
        };
        if !response.ok() {
            log::debug!("{url}: HTTP {}, trying next", response.status());
            continue;
        }
        match response.text().await {
            Ok(body) => match Catalog::from_json(&body) {
                Ok(catalog) => {
                    log::info!("loaded {} images from {url}", catalog.len());
                    return Ok(catalog);
                }
                Err(err) => log::warn!("{url}: malformed catalog: {err}"),
            },
            Err(err) => log::warn!("{url}: {err}"),
        }
    }
    Err(LoadError)
}

#[derive(Clone, Debug, PartialEq)]
struct GuessFeedback {
    guessed: Label,
    correct: Label,
}

/// Whether the next round keeps the previous round's photo URL. The browser
/// fires no load event for an unchanged `src`, so the caller must reuse the
/// cached natural size and restart the reveal cadence itself.
fn photo_reused(prev_url: Option<&str>, next_url: Option<&str>) -> bool {
    prev_url.is_some() && prev_url == next_url
}

pub(crate) enum Msg {
    CatalogLoaded(Result<Catalog, LoadError>),
    PhotoReady { width: u32, height: u32 },
    RevealTick,
    Guess(Label),
    TogglePause,
    AdvanceRound,
    Relayout,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub seed: u64,
}

pub(crate) struct GameView {
    session: Option<GameSession>,
    load_failed: bool,
    natural_size: Option<(u32, u32)>,
    fit: Option<FitRect>,
    last_guess: Option<GuessFeedback>,
    container_ref: NodeRef,
    reveal_timer: Option<Interval>,
    // held so the scheduled transition stays alive; never cancelled early
    advance_timer: Option<Timeout>,
    _resize_listener: EventListener,
}

impl GameView {
    fn create_reveal_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(REVEAL_INTERVAL_MS, move || {
            link.send_message(Msg::RevealTick)
        })
    }

    /// Stops the reveal cadence and schedules the one non-cancellable
    /// transition to the next round.
    fn finish_round(&mut self, ctx: &Context<Self>) {
        self.reveal_timer = None;
        let link = ctx.link().clone();
        self.advance_timer = Some(Timeout::new(ROUND_END_DELAY_MS, move || {
            link.send_message(Msg::AdvanceRound)
        }));
    }

    /// Recomputes the grid overlay. Missing nodes or degenerate sizes keep
    /// the previous geometry; layout never touches round state.
    fn refit(&mut self) -> bool {
        let Some(fit) = self.compute_fit() else {
            return false;
        };
        if self.fit == Some(fit) {
            false
        } else {
            self.fit = Some(fit);
            true
        }
    }

    fn compute_fit(&self) -> Option<FitRect> {
        let (width, height) = self.natural_size?;
        let container = self.container_ref.cast::<web_sys::HtmlElement>()?;
        fit_contain(
            (f64::from(width), f64::from(height)),
            (
                f64::from(container.client_width()),
                f64::from(container.client_height()),
            ),
        )
    }

    fn view_tiles(&self, session: &GameSession) -> Html {
        html! {
            { for (0..TILES).map(|tile| {
                let (row, col) = tile.to_row_col();
                let class = classes!(
                    "tile",
                    session.is_tile_revealed(tile).then_some("hidden"),
                    (row == 0).then_some("edge-top"),
                    (row == GRID_SIZE - 1).then_some("edge-bottom"),
                    (col == 0).then_some("edge-left"),
                    (col == GRID_SIZE - 1).then_some("edge-right"),
                );
                html! { <div {class}/> }
            }) }
        }
    }

    fn view_buttons(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let resolved = session.phase().is_resolved();
        html! {
            { for session.roster().iter().map(|member| {
                let mut class = classes!("guess");
                if let Some(feedback) = &self.last_guess {
                    if *member == feedback.correct {
                        class.push("correct");
                    } else if *member == feedback.guessed {
                        class.push("wrong");
                    }
                }
                let onclick = {
                    let member = member.clone();
                    ctx.link().callback(move |_| Msg::Guess(member.clone()))
                };
                html! {
                    <button {class} disabled={resolved} {onclick}>{ member.as_str() }</button>
                }
            }) }
        }
    }

    fn view_attribution(image: &ImageRecord) -> Html {
        let mut parts: Vec<String> = Vec::new();
        if let Some(year) = image.year {
            parts.push(year.to_string());
        }
        if let Some(credit) = &image.credit {
            parts.push(format!("© {credit}"));
        }
        if let Some(license) = &image.license {
            parts.push(license.clone());
        }
        let text = parts.join(" · ");
        match &image.source {
            Some(source) => html! {
                <p class="attribution">
                    { text }{ " · " }
                    <a href={source.clone()} target="_blank" rel="noopener noreferrer">{"source"}</a>
                </p>
            },
            None => html! { <p class="attribution">{ text }</p> },
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        {
            let link = ctx.link().clone();
            wasm_bindgen_futures::spawn_local(async move {
                link.send_message(Msg::CatalogLoaded(fetch_catalog().await));
            });
        }

        let resize_listener = {
            let link = ctx.link().clone();
            EventListener::new(&gloo::utils::window(), "resize", move |_| {
                link.send_message(Msg::Relayout)
            })
        };

        Self {
            session: None,
            load_failed: false,
            natural_size: None,
            fit: None,
            last_guess: None,
            container_ref: NodeRef::default(),
            reveal_timer: None,
            advance_timer: None,
            _resize_listener: resize_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CatalogLoaded(Ok(catalog)) => {
                let mut session = GameSession::new(catalog, ctx.props().seed);
                if let Err(err) = session.start_round() {
                    log::warn!("no first round: {err}");
                }
                self.session = Some(session);
                true
            }
            CatalogLoaded(Err(LoadError)) => {
                log::error!("no image source responded");
                self.load_failed = true;
                true
            }
            PhotoReady { width, height } => {
                log::debug!("photo ready: {width}x{height}");
                self.natural_size = Some((width, height));
                self.refit();
                // fresh cadence per round; replacing the handle cancels any prior timer
                self.reveal_timer = Some(GameView::create_reveal_timer(ctx));
                true
            }
            RevealTick => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                let outcome = session.tick();
                if outcome == TickOutcome::FullyRevealed {
                    self.finish_round(ctx);
                }
                outcome.has_update()
            }
            Guess(label) => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                match session.submit_guess(&label) {
                    GuessOutcome::Ignored => false,
                    GuessOutcome::Correct { awarded } => {
                        log::debug!("correct guess, +{awarded}");
                        self.last_guess = Some(GuessFeedback {
                            correct: label.clone(),
                            guessed: label,
                        });
                        self.finish_round(ctx);
                        true
                    }
                    GuessOutcome::Incorrect { correct } => {
                        log::debug!("wrong guess: {label}, was {correct}");
                        self.last_guess = Some(GuessFeedback {
                            guessed: label,
                            correct,
                        });
                        self.finish_round(ctx);
                        true
                    }
                }
            }
            TogglePause => match self.session.as_mut() {
                Some(session) => {
                    session.toggle_pause();
                    true
                }
                None => false,
            },
            AdvanceRound => {
                self.advance_timer = None;
                self.last_guess = None;
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                let prev_url = session.current_image().map(|image| image.url.clone());
                if let Err(err) = session.advance_round() {
                    log::warn!("skipping round: {err}");
                }
                let next_url = session.current_image().map(|image| image.url.clone());
                if photo_reused(prev_url.as_deref(), next_url.as_deref())
                    && self.natural_size.is_some()
                {
                    // no load event is coming; the cached size and fit still apply
                    self.reveal_timer = Some(GameView::create_reveal_timer(ctx));
                } else {
                    self.natural_size = None;
                    self.fit = None;
                }
                true
            }
            Relayout => self.refit(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.load_failed {
            return html! {
                <div class="retrato">
                    <div class="load-error">
                        <h2>{"Failed to load images"}</h2>
                        <p>{ LOAD_ERROR_HELP }</p>
                    </div>
                </div>
            };
        }
        let Some(session) = &self.session else {
            return html! {
                <div class="retrato"><p class="loading">{"Loading images…"}</p></div>
            };
        };

        let hud = session.hud();
        let paused = session.is_paused();
        let grid_style = self.fit.map(|fit| {
            format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;",
                fit.left, fit.top, fit.width, fit.height
            )
        });
        let onload = ctx.link().callback(|e: Event| {
            let img: web_sys::HtmlImageElement = e.target_unchecked_into();
            Msg::PhotoReady {
                width: img.natural_width(),
                height: img.natural_height(),
            }
        });
        let cb_pause = ctx.link().callback(|_| Msg::TogglePause);

        html! {
            <div class="retrato">
                <nav class="hud">
                    <span class="round">{"Round "}{ hud.round_index + 1 }</span>
                    <span class="score">{"Score "}{ hud.score }</span>
                    <span class="revealed">{"Revealed "}{ hud.revealed_count }</span>
                    <span class="potential">{"Potential "}{ hud.potential_points }</span>
                    <button class={classes!("pause", paused.then_some("paused"))} onclick={cb_pause}>
                        <span class="pause-icon">{ if paused { "▶" } else { "⏸" } }</span>
                    </button>
                </nav>
                {
                    match session.current_image() {
                        Some(image) => html! {
                            <>
                                <div class="image-container" ref={self.container_ref.clone()}>
                                    <img class="photo" src={image.url.clone()} {onload}/>
                                    <div class="overlay-grid" style={grid_style}>
                                        { self.view_tiles(session) }
                                    </div>
                                </div>
                                { GameView::view_attribution(image) }
                            </>
                        },
                        None => html! { <p class="empty">{"No images to play with."}</p> },
                    }
                }
                <div class="buttons">
                    { self.view_buttons(ctx, session) }
                </div>
            </div>
        }
    }
}
