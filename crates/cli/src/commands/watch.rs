use std::time::Duration;

use dutch_core::{Auction, AuctionPhase, Price, Timestamp, current_price};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Gauge, Paragraph},
};
use tracing::info;

use crate::{
    commands::{CommandContext, unix_now},
    config::NetworkSection,
    display::{format_countdown, token_label},
};

pub struct WatchArgs {
    pub tick: Duration,
}

/// Everything one frame shows, captured from the auction at a single `now`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub status: &'static str,
    pub status_color: Color,
    pub countdown: String,
    pub current_price: Price,
    pub progress: f64,
    pub details: Vec<(&'static str, String)>,
}

impl DashboardView {
    pub fn capture(auction: &Auction, network: Option<&NetworkSection>, now: Timestamp) -> Self {
        let phase = auction.phase(now);
        let status_color = match phase {
            AuctionPhase::Active { .. } => Color::Green,
            AuctionPhase::Expired => Color::Red,
            AuctionPhase::Ended => Color::Gray,
        };

        let pair = auction.pair();
        let title = match network {
            Some(network) => format!(
                " {} / {} on {} ",
                token_label(pair.token0()),
                token_label(pair.token1()),
                network.name
            ),
            None => format!(
                " {} / {} ",
                token_label(pair.token0()),
                token_label(pair.token1())
            ),
        };

        let mut details = vec![
            ("start price", auction.start_price().to_string()),
            ("floor price", auction.floor_price().to_string()),
            ("decay", format!("{} / s", auction.decay_per_second())),
            ("fee", auction.fee().to_string()),
            ("starts", auction.start_time().to_string()),
            ("ends", auction.end_time().to_string()),
        ];
        if let Some(at) = auction.floor_reached_at() {
            details.push(("floor at", at.to_string()));
        }
        if let Some(contract) = network.and_then(|n| n.contract.as_deref()) {
            details.push(("contract", token_label(contract)));
        }

        Self {
            title,
            status: phase.label(),
            status_color,
            countdown: format_countdown(auction.time_remaining(now)),
            current_price: current_price(auction, now),
            progress: auction.progress(now),
            details,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let [header, cards, gauge, details, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new("Encrypted Dutch Auction".bold())
                .block(Block::bordered().title(self.title.as_str())),
            header,
        );

        self.render_cards(frame, cards);

        frame.render_widget(
            Gauge::default()
                .block(Block::bordered().title(" elapsed "))
                .gauge_style(Style::new().fg(self.status_color))
                .ratio(self.progress.clamp(0.0, 1.0))
                .label(format!("{:.1}%", self.progress * 100.0)),
            gauge,
        );

        let lines: Vec<Line> = self
            .details
            .iter()
            .map(|(label, value)| Line::from(format!("{label:<12} {value}")))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(" auction ")),
            details,
        );

        frame.render_widget(Line::from("q / esc to quit").dim(), footer);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let [status, remaining, price] =
            Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(area);

        frame.render_widget(
            Paragraph::new(self.status.fg(self.status_color).bold())
                .block(Block::bordered().title(" status ")),
            status,
        );
        frame.render_widget(
            Paragraph::new(self.countdown.as_str())
                .block(Block::bordered().title(" time remaining ")),
            remaining,
        );
        frame.render_widget(
            Paragraph::new(self.current_price.to_string())
                .block(Block::bordered().title(" current price ")),
            price,
        );
    }
}

/// Live dashboard: re-prices the auction with a fresh clock reading on every
/// tick until `q` or `Esc` is pressed.
pub async fn watch(ctx: &CommandContext, args: WatchArgs) -> eyre::Result<()> {
    let auction = ctx.auction(unix_now())?;
    info!(
        start_time = %auction.start_time(),
        end_time = %auction.end_time(),
        "starting dashboard"
    );

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &auction, ctx.network.as_ref(), args.tick).await;
    ratatui::restore();

    info!("dashboard closed");
    result
}

async fn run(
    terminal: &mut DefaultTerminal,
    auction: &Auction,
    network: Option<&NetworkSection>,
    tick: Duration,
) -> eyre::Result<()> {
    let mut ticker = tokio::time::interval(tick);

    loop {
        ticker.tick().await;

        let view = DashboardView::capture(auction, network, unix_now());
        terminal.draw(|frame| view.render(frame))?;

        if quit_requested()? {
            return Ok(());
        }
    }
}

fn quit_requested() -> eyre::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use ratatui::{Terminal, backend::TestBackend};

    fn auction() -> Auction {
        fixtures::context(Some(0))
            .auction(Timestamp::new(0))
            .expect("valid auction")
    }

    #[test]
    fn captures_active_auction() {
        let view = DashboardView::capture(&auction(), None, Timestamp::new(50));

        assert_eq!(view.status, "Active");
        assert_eq!(view.status_color, Color::Green);
        assert_eq!(view.countdown, "59m 10s");
        assert_eq!(view.current_price, Price::from(500));
        assert!(
            view.title
                .contains("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed / USDC")
        );
        assert!(view.details.contains(&("floor at", "90".to_string())));
    }

    #[test]
    fn captures_expired_and_ended_states() {
        let mut auction = auction();
        let view = DashboardView::capture(&auction, None, Timestamp::new(3_600));
        assert_eq!(view.status, "Time Expired");
        assert_eq!(view.status_color, Color::Red);
        assert_eq!(view.countdown, "0m 0s");
        assert_eq!(view.progress, 1.0);

        auction.deactivate();
        let view = DashboardView::capture(&auction, None, Timestamp::new(100));
        assert_eq!(view.status, "Auction Ended");
        assert_eq!(view.status_color, Color::Gray);
    }

    #[test]
    fn shows_network_in_title() {
        let network = NetworkSection {
            name: "sepolia".into(),
            contract: Some("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".into()),
        };
        let view = DashboardView::capture(&auction(), Some(&network), Timestamp::new(0));
        assert!(view.title.ends_with(" on sepolia "));
        assert!(view.details.contains(&(
            "contract",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359".to_string()
        )));
    }

    #[test]
    fn renders_into_test_backend() {
        let view = DashboardView::capture(&auction(), None, Timestamp::new(50));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("test backend");
        terminal
            .draw(|frame| view.render(frame))
            .expect("frame renders");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Active"));
        assert!(text.contains("59m 10s"));
        assert!(text.contains("500"));
    }
}
