use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use eframe::egui::{self, ColorImage, Key, TextureHandle, TextureOptions};

use crate::nes::{Button, Nes};

const NTSC_FRAME_RATE_HZ: f64 = 60.098_813_897_440_515;
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES_PER_UPDATE: u32 = 2;

const BUTTON_KEYS: [(Button, &[Key]); 8] = [
    (Button::A, &[Key::Z, Key::Space]),
    (Button::B, &[Key::X]),
    (Button::Select, &[Key::Backspace]),
    (Button::Start, &[Key::Enter]),
    (Button::Up, &[Key::W, Key::ArrowUp]),
    (Button::Down, &[Key::S, Key::ArrowDown]),
    (Button::Left, &[Key::A, Key::ArrowLeft]),
    (Button::Right, &[Key::D, Key::ArrowRight]),
];

pub struct KinescopeApp {
    nes: Nes,
    frame_texture: Option<TextureHandle>,
    status_line: String,
    loaded_rom: Option<PathBuf>,
    frame_interval: Duration,
    next_frame_at: Option<Instant>,
    paused: bool,
}

impl KinescopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            nes: Nes::new(),
            frame_texture: None,
            status_line: "Drop a .nes file or click Open ROM".to_string(),
            loaded_rom: None,
            frame_interval: Duration::from_secs_f64(1.0 / NTSC_FRAME_RATE_HZ),
            next_frame_at: None,
            paused: false,
        }
    }

    fn load_rom(&mut self, path: &Path) {
        match self.nes.load_rom_from_path(path) {
            Ok(()) => {
                self.loaded_rom = Some(path.to_path_buf());
                self.status_line = format!(
                    "Loaded {} ({})",
                    path.file_name().and_then(|f| f.to_str()).unwrap_or("ROM"),
                    self.nes.mapper_name()
                );
                self.frame_texture = None;
                self.next_frame_at = None;
                self.paused = false;
            }
            Err(err) => {
                self.status_line = format!("Failed to load ROM: {err:#}");
            }
        }
    }

    fn open_rom_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("NES ROM", &["nes"])
            .set_title("Open NES ROM")
            .pick_file()
        {
            self.load_rom(&path);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                let is_nes = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("nes"))
                    .unwrap_or(false);

                if is_nes {
                    self.load_rom(&path);
                } else {
                    self.status_line = format!("Unsupported file: {}", path.display());
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(Key::O)) {
            self.open_rom_dialog();
        }

        if ctx.input(|i| i.key_pressed(Key::R)) && self.nes.has_rom() {
            self.nes.reset();
            self.next_frame_at = None;
            self.status_line = "Reset complete".to_string();
        }

        if ctx.input(|i| i.key_pressed(Key::P)) && self.nes.has_rom() {
            self.paused = !self.paused;
        }
    }

    fn apply_controller_input(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            for (button, keys) in BUTTON_KEYS {
                let pressed = keys.iter().any(|key| input.key_down(*key));
                self.nes.set_button(button, pressed);
            }
        });
    }

    fn update_texture(&mut self, ctx: &egui::Context) {
        let image = ColorImage::from_rgba_unmultiplied([256, 240], self.nes.frame_buffer());

        if let Some(texture) = self.frame_texture.as_mut() {
            texture.set(image, TextureOptions::NEAREST);
        } else {
            self.frame_texture =
                Some(ctx.load_texture("nes-frame", image, TextureOptions::NEAREST));
        }
    }
}

impl eframe::App for KinescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);
        self.apply_controller_input(ctx);

        if self.nes.has_rom() && !self.paused {
            let now = Instant::now();
            let mut next = self.next_frame_at.unwrap_or(now);
            let mut ran_frames = 0u32;

            while Instant::now() >= next && ran_frames < MAX_FRAMES_PER_UPDATE {
                self.nes.run_frame();
                ran_frames += 1;
                next += self.frame_interval;
            }

            // don't try to catch up after a long stall
            if ran_frames == 0 && now > next + self.frame_interval {
                next = now;
            }

            self.next_frame_at = Some(next);
        }

        self.update_texture(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open ROM").clicked() {
                    self.open_rom_dialog();
                }

                if ui
                    .add_enabled(self.nes.has_rom(), egui::Button::new("Reset (R)"))
                    .clicked()
                {
                    self.nes.reset();
                    self.next_frame_at = None;
                    self.status_line = "Reset complete".to_string();
                }

                if ui
                    .add_enabled(
                        self.nes.has_rom(),
                        egui::Button::new(if self.paused { "Resume (P)" } else { "Pause (P)" }),
                    )
                    .clicked()
                {
                    self.paused = !self.paused;
                }

                if let Some(path) = &self.loaded_rom {
                    ui.separator();
                    ui.label(path.display().to_string());
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(&self.status_line);
                ui.separator();
                ui.label(format!("Mapper: {}", self.nes.mapper_name()));
                ui.separator();
                ui.label(
                    "Controls: WASD/arrows move, Z/Space=A, X=B, Enter=Start, \
                     Backspace=Select, R=Reset, P=Pause",
                );
            });

            ui.separator();
            let (a, x, y, p, sp, pc) = self.nes.cpu_regs();
            let (scanline, dot) = self.nes.ppu_scanline_dot();
            let counters = self.nes.debug_counters();
            ui.collapsing("Debug", |ui| {
                ui.monospace(format!(
                    "CPU A={a:02X} X={x:02X} Y={y:02X} P={p:02X} SP={sp:02X} PC={pc:04X}"
                ));
                ui.monospace(format!(
                    "frames={} cycles={} steps={} reads={} writes={} dma={} nmi={} irq={} | PPU sl={} dot={}",
                    self.nes.frame_count(),
                    self.nes.total_cycles(),
                    counters.cpu_steps,
                    counters.cpu_reads,
                    counters.cpu_writes,
                    counters.dma_transfers,
                    counters.nmi_serviced,
                    counters.irq_serviced,
                    scanline,
                    dot
                ));

                let events = self.nes.debug_recent_events(8);
                if !events.is_empty() {
                    ui.separator();
                    ui.label("Recent events:");
                    for event in events {
                        ui.monospace(event);
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let available = ui.available_size();
                let scale_x = (available.x / 256.0).max(1.0);
                let scale_y = (available.y / 240.0).max(1.0);
                let scale = scale_x.min(scale_y).floor().max(1.0);
                let target = egui::vec2(256.0 * scale, 240.0 * scale);

                if let Some(texture) = &self.frame_texture {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(target));
                }
            });
        });

        if let Some(next) = self.next_frame_at {
            let wait = next.saturating_duration_since(Instant::now());
            ctx.request_repaint_after(wait.min(IDLE_REPAINT_INTERVAL));
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}
