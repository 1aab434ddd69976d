use std::collections::VecDeque;
use std::time::Instant;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use egui_plot::{Line, Plot, PlotPoints};

use mars_lander::pilot::{HeuristicPilot, Pilot};
use mars_lander::sim::{FlightState, Snapshot};
use mars_lander::{LanderConfig, Observation, Session, ThrustIntent};

const HISTORY: usize = 600;
const VIEW_HEIGHT: f32 = 720.0; // world px shown top to bottom

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match LanderConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%err, "falling back to arcade defaults");
                LanderConfig::arcade()
            }
        },
        None => LanderConfig::arcade(),
    };

    let app = LanderViz::new(config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native("Mars Lander", options, Box::new(|_| Ok(Box::new(app))))
}

struct LanderViz {
    session: Session,
    pilot: HeuristicPilot,
    autopilot: bool,
    last_frame: Instant,
    history: VecDeque<[f64; 3]>, // time, speed, fuel
}

impl LanderViz {
    fn new(config: LanderConfig) -> Self {
        Self {
            session: Session::new(config, None),
            pilot: HeuristicPilot::new(),
            autopilot: false,
            last_frame: Instant::now(),
            history: VecDeque::with_capacity(HISTORY),
        }
    }

    fn read_intent(&mut self, ctx: &egui::Context, dt: f64) -> ThrustIntent {
        if self.autopilot {
            let obs = Observation::capture(self.session.simulation());
            return self.pilot.decide(&obs, dt);
        }
        ctx.input(|i| {
            if i.key_down(egui::Key::ArrowUp) || i.key_down(egui::Key::Space) {
                ThrustIntent::Hover
            } else if i.key_down(egui::Key::ArrowLeft) {
                ThrustIntent::PushLeft
            } else if i.key_down(egui::Key::ArrowRight) {
                ThrustIntent::PushRight
            } else {
                ThrustIntent::None
            }
        })
    }

    fn tick(&mut self, ctx: &egui::Context) {
        let (restart, toggle) = ctx.input(|i| (i.key_pressed(egui::Key::R), i.key_pressed(egui::Key::P)));
        if toggle {
            self.autopilot = !self.autopilot;
            self.pilot.reset();
        }
        if restart {
            self.session.restart(None);
            self.pilot.reset();
            self.history.clear();
        }

        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        let dt = elapsed.as_secs_f64().min(self.session.simulation().config().episode.max_frame_dt);
        let intent = self.read_intent(ctx, dt);
        self.session.advance(intent, elapsed);

        let sim = self.session.simulation();
        if sim.flight() != FlightState::Idle {
            if self.history.len() == HISTORY {
                self.history.pop_front();
            }
            self.history.push_back([sim.time(), sim.vehicle().speed(), sim.vehicle().fuel]);
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// World (px, +y down) to screen, following the vehicle horizontally.
struct Camera {
    rect: Rect,
    scale: f32,
    center_x: f64,
}

impl Camera {
    fn follow(rect: Rect, snapshot: &Snapshot) -> Self {
        Self {
            rect,
            scale: rect.height() / VIEW_HEIGHT,
            center_x: snapshot.vehicle.x,
        }
    }

    fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(
            self.rect.center().x + (x - self.center_x) as f32 * self.scale,
            self.rect.top() + y as f32 * self.scale,
        )
    }

    fn rect(&self, left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect::from_min_size(
            self.to_screen(left, top),
            Vec2::new(width as f32, height as f32) * self.scale,
        )
    }
}

fn draw_world(painter: &egui::Painter, cam: &Camera, snap: &Snapshot) {
    painter.rect_filled(cam.rect, 0.0, Color32::from_rgb(26, 16, 20));

    let ground = cam.to_screen(0.0, snap.ground_level).y;
    painter.line_segment(
        [Pos2::new(cam.rect.left(), ground), Pos2::new(cam.rect.right(), ground)],
        Stroke::new(1.0, Color32::from_rgb(120, 60, 40)),
    );

    for p in &snap.platforms {
        let color = if p.index == snap.target {
            Color32::from_rgb(90, 200, 120)
        } else if p.index <= snap.score {
            Color32::from_rgb(110, 110, 110)
        } else {
            Color32::from_rgb(190, 110, 70)
        };
        painter.rect_filled(cam.rect(p.x, p.y, p.width, p.height), 0.0, color);
        painter.text(
            cam.to_screen(p.center_x(), p.y + p.height * 0.5),
            Align2::CENTER_CENTER,
            p.index.to_string(),
            FontId::monospace(11.0),
            Color32::BLACK,
        );
    }

    let v = &snap.vehicle;
    let body = cam.rect(v.x - v.width * 0.5, v.y - v.height, v.width, v.height);
    painter.rect_filled(body, 2.0, Color32::from_rgb(220, 220, 230));

    let flame = Color32::from_rgb(255, 170, 40);
    let flame_len = 14.0 * cam.scale;
    if v.thrusters.left {
        let at = body.left_bottom();
        painter.line_segment([at, at + Vec2::new(-flame_len * 0.4, flame_len)], Stroke::new(3.0, flame));
    }
    if v.thrusters.right {
        let at = body.right_bottom();
        painter.line_segment([at, at + Vec2::new(flame_len * 0.4, flame_len)], Stroke::new(3.0, flame));
    }

    let banner = match snap.flight {
        FlightState::Idle => Some("press an arrow key to launch"),
        FlightState::Terminated => Some("R to restart"),
        _ => None,
    };
    if let Some(text) = banner {
        painter.text(
            cam.rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(22.0),
            Color32::WHITE,
        );
    }
}

impl eframe::App for LanderViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);
        let snap = self.session.snapshot();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.label(format!(
                "Score: {}  |  Best: {}  |  Fuel: {:>3.0}%  |  Wind: {:+.0}  |  Speed: {:.0} px/s  |  Autopilot (P): {}",
                snap.score,
                self.session.best_score(),
                snap.vehicle.fuel_fraction() * 100.0,
                snap.wind,
                snap.vehicle.vx.hypot(snap.vehicle.vy),
                if self.autopilot { "on" } else { "off" },
            ));
        });

        egui::SidePanel::right("telemetry").min_width(320.0).show(ctx, |ui| {
            let half_h = ui.available_height() / 2.0 - 16.0;

            ui.label("Speed (px/s)");
            let points: PlotPoints = self.history.iter().map(|h| [h[0], h[1]]).collect();
            Plot::new("speed")
                .height(half_h)
                .x_axis_label("Time (s)")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Speed", points));
                });

            ui.label("Fuel");
            let points: PlotPoints = self.history.iter().map(|h| [h[0], h[2]]).collect();
            Plot::new("fuel")
                .height(half_h)
                .x_axis_label("Time (s)")
                .include_y(0.0)
                .include_y(snap.vehicle.max_fuel)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Fuel", points));
                });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
            let cam = Camera::follow(response.rect, &snap);
            draw_world(&painter, &cam, &snap);
        });

        ctx.request_repaint();
    }
}
