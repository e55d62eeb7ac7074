use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Length, Task};
use rangeview::config::Config;
use rangeview::{DraggingState, RangeEvent, range_view};
use tracing_subscriber::EnvFilter;

const PRESETS: [(&str, f32, f32); 3] = [
    ("First half", 0.0, 0.5),
    ("Middle", 0.25, 0.75),
    ("Collapsed", 0.5, 0.5),
];

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rangeview=info")),
        )
        .init();

    iced::application(RangeDemo::new, RangeDemo::update, RangeDemo::view)
        .title(RangeDemo::title)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Range(Vec<RangeEvent>),
    Preset(f32, f32),
    MaxChanged(f32),
}

struct RangeDemo {
    config: Config,
    max_value: f32,
    values: Option<(f32, f32)>,
    left_toggle: Option<(f32, f32)>,
    right_toggle: Option<(f32, f32)>,
    dragging_state: DraggingState,
    completed_drags: usize,
}

impl RangeDemo {
    fn new() -> (Self, Task<Message>) {
        let config = Config::from_env().unwrap_or_else(|err| {
            tracing::error!(%err, "invalid configuration, using defaults");
            Config::default()
        });
        tracing::info!(
            min_value = config.min_value,
            max_value = config.max_value,
            "starting range view demo"
        );

        (
            RangeDemo {
                max_value: config.max_value,
                values: config.initial_values,
                config,
                left_toggle: None,
                right_toggle: None,
                dragging_state: DraggingState::Idle,
                completed_drags: 0,
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        match self.values {
            Some((left, right)) => format!("Range view - {left:.1} to {right:.1}"),
            None => "Range view".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Range(events) => {
                for event in events {
                    self.apply(event);
                }
            }
            Message::Preset(left_fraction, right_fraction) => {
                let values = (
                    self.max_value * left_fraction,
                    self.max_value * right_fraction,
                );
                tracing::debug!(?values, "applying preset");
                self.values = Some(values);
            }
            Message::MaxChanged(max_value) => {
                tracing::debug!(max_value, "max value changed");
                self.max_value = max_value;
            }
        }
        Task::none()
    }

    fn apply(&mut self, event: RangeEvent) {
        match event {
            RangeEvent::RangeChanged {
                left_value,
                right_value,
                ..
            } => {
                self.values = Some((left_value, right_value));
            }
            RangeEvent::LeftTogglePositionChanged { x, value } => {
                self.left_toggle = Some((x, value));
            }
            RangeEvent::RightTogglePositionChanged { x, value } => {
                self.right_toggle = Some((x, value));
            }
            RangeEvent::DraggingStateChanged(state) => {
                if state == DraggingState::DragEnd {
                    self.completed_drags += 1;
                    tracing::info!(values = ?self.values, "drag finished");
                }
                self.dragging_state = state;
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let slider = range_view(self.config.min_value..=self.max_value, Message::Range)
            .values(self.values)
            .style(self.config.style);

        let selection = match self.values {
            Some((left, right)) => format!("Selected: {left:.2} - {right:.2}"),
            None => format!(
                "Selected: whole range ({:.2} - {:.2})",
                self.config.min_value, self.max_value
            ),
        };

        let toggle_label = |name: &str, toggle: Option<(f32, f32)>| match toggle {
            Some((x, value)) => format!("{name} toggle: x = {x:.1} px, value = {value:.2}"),
            None => format!("{name} toggle: not moved yet"),
        };

        let status = column![
            text(selection).size(16),
            text(toggle_label("Left", self.left_toggle)).size(12),
            text(toggle_label("Right", self.right_toggle)).size(12),
            text(format!(
                "State: {} ({} drags finished)",
                self.dragging_state, self.completed_drags
            ))
            .size(12),
        ]
        .spacing(4);

        let presets = PRESETS.iter().fold(
            row![text("Presets:").size(12)]
                .spacing(8)
                .align_y(Alignment::Center),
            |row, (label, left, right)| {
                row.push(button(text(*label).size(12)).on_press(Message::Preset(*left, *right)))
            },
        );

        let max_values = [50.0, 100.0, 1000.0].into_iter().fold(
            row![text("Max value:").size(12)]
                .spacing(8)
                .align_y(Alignment::Center),
            |row, max_value| {
                row.push(
                    button(text(format!("{max_value}")).size(12))
                        .on_press(Message::MaxChanged(max_value)),
                )
            },
        );

        let hints = column![
            text("Hints").size(16),
            row![
                text("Drag a toggle:").width(Length::Fixed(160.0)).size(12),
                text("Move that edge of the selection").size(12)
            ],
            row![
                text("Drag overlapping toggles:")
                    .width(Length::Fixed(160.0))
                    .size(12),
                text("The direction of travel picks the toggle").size(12)
            ],
            row![
                text("Max value buttons:")
                    .width(Length::Fixed(160.0))
                    .size(12),
                text("Rescale values without moving the toggles").size(12)
            ],
        ]
        .spacing(6)
        .padding(6);

        let content = column![
            text("Range view").size(20),
            slider,
            status,
            presets,
            max_values,
            Space::new().height(Length::Fixed(8.0)),
            container(hints).padding(6).style(|_theme: &iced::Theme| {
                container::Style::default().background(iced::Color::from_rgb(0.99, 0.99, 0.99))
            }),
        ]
        .spacing(12)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
