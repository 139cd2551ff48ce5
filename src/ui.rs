//! Shared palette and widget builders for every scene's UI.
//!
//! All widgets are plain Bevy UI nodes.  Root nodes carry
//! [`SceneEntity`](crate::scene::SceneEntity) so they vanish with their scene;
//! children are despawned with their root.

use crate::scene::SceneEntity;
use bevy::prelude::*;

pub fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
pub fn body_color() -> Color {
    Color::srgb(0.90, 0.90, 1.0)
}
pub fn hint_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub fn accent_color() -> Color {
    Color::srgb(0.35, 0.95, 0.45)
}
pub fn next_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub fn next_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub fn next_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub fn back_bg() -> Color {
    Color::srgb(0.12, 0.12, 0.18)
}
pub fn back_border() -> Color {
    Color::srgb(0.30, 0.30, 0.46)
}
pub fn back_text() -> Color {
    Color::srgb(0.55, 0.55, 0.70)
}
pub fn panel_bg() -> Color {
    Color::srgba(0.95, 0.95, 1.0, 0.92)
}
pub fn panel_text() -> Color {
    Color::srgb(0.08, 0.08, 0.14)
}

/// Where a corner widget is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn node(self, margin: f32) -> Node {
        let mut node = Node {
            position_type: PositionType::Absolute,
            ..default()
        };
        match self {
            Corner::TopLeft => {
                node.top = Val::Px(margin);
                node.left = Val::Px(margin);
            }
            Corner::TopRight => {
                node.top = Val::Px(margin);
                node.right = Val::Px(margin);
            }
            Corner::BottomLeft => {
                node.bottom = Val::Px(margin);
                node.left = Val::Px(margin);
            }
            Corner::BottomRight => {
                node.bottom = Val::Px(margin);
                node.right = Val::Px(margin);
            }
        }
        node
    }
}

/// Button palette.
#[derive(Debug, Clone, Copy)]
pub enum ButtonStyle {
    Forward,
    Back,
}

impl ButtonStyle {
    pub fn bg(self) -> Color {
        match self {
            ButtonStyle::Forward => next_bg(),
            ButtonStyle::Back => back_bg(),
        }
    }
    pub fn border(self) -> Color {
        match self {
            ButtonStyle::Forward => next_border(),
            ButtonStyle::Back => back_border(),
        }
    }
    pub fn text(self) -> Color {
        match self {
            ButtonStyle::Forward => next_text(),
            ButtonStyle::Back => back_text(),
        }
    }
}

/// Spawn a labelled button pinned to `corner`, tagged with `marker`.
pub fn spawn_corner_button(
    commands: &mut Commands,
    corner: Corner,
    label: &str,
    style: ButtonStyle,
    marker: impl Component,
) -> Entity {
    let mut node = corner.node(24.0);
    node.width = Val::Px(120.0);
    node.height = Val::Px(44.0);
    node.justify_content = JustifyContent::Center;
    node.align_items = AlignItems::Center;
    node.border = UiRect::all(Val::Px(2.0));

    commands
        .spawn((
            Button,
            node,
            BackgroundColor(style.bg()),
            BorderColor::all(style.border()),
            SceneEntity,
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(style.text()),
            ));
        })
        .id()
}

/// Full-width text block whose top edge sits `top` below the window top.
///
/// `marker` lands on the text entity itself.
pub fn spawn_text_block(
    commands: &mut Commands,
    top: Val,
    text: &str,
    font_size: f32,
    color: Color,
    marker: impl Bundle,
) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top,
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                padding: UiRect::horizontal(Val::Px(28.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            SceneEntity,
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(text),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(color),
                TextLayout::new_with_justify(Justify::Center),
                marker,
            ));
        })
        .id()
}

/// Brighten a button's label while hovered.
pub fn hover_text_color(
    interaction: &Interaction,
    children: &Children,
    idle: Color,
    texts: &mut Query<&mut TextColor>,
) {
    let color = match interaction {
        Interaction::Hovered | Interaction::Pressed => Color::WHITE,
        Interaction::None => idle,
    };
    for child in children.iter() {
        if let Ok(mut text_color) = texts.get_mut(child) {
            *text_color = TextColor(color);
        }
    }
}

pub fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Fade a text's alpha from zero to its target over `secs`.
#[derive(Component, Debug, Clone)]
pub struct FadeIn {
    pub elapsed: f32,
    pub secs: f32,
    pub target: Color,
}

impl FadeIn {
    pub fn new(secs: f32, target: Color) -> Self {
        Self {
            elapsed: 0.0,
            secs,
            target,
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.secs).clamp(0.0, 1.0)
    }
}

/// Advance every fade; the component is removed when it completes.
pub fn fade_in_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut FadeIn, &mut TextColor)>,
) {
    for (entity, mut fade, mut color) in query.iter_mut() {
        fade.elapsed += time.delta_secs();
        let alpha = fade.alpha();
        *color = TextColor(fade.target.with_alpha(fade.target.alpha() * alpha));
        if alpha >= 1.0 {
            commands.entity(entity).remove::<FadeIn>();
        }
    }
}
