use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use pie_core::Paint;

pub struct ThemeColors {
    pub normal: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub focus: Srgba<f64>,
    pub success: Srgba<f64>,
    pub fail: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            normal: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.0, 0.0, 0.0, 0.5),
                Some(0.5),
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(51.0 / 255.0, 181.0 / 255.0, 229.0 / 255.0, 1.0),
                None,
            ),
            focus: Srgba::new(1.0, 1.0, 1.0, 1.0),
            success: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.0, 1.0, 0.0, 1.0),
                Some(1.0),
            ),
            fail: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(1.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    pub fn paint(&self, paint: Paint) -> Srgba<f64> {
        match paint {
            Paint::Normal => self.normal,
            Paint::Selected => self.selected,
            Paint::Focus => self.focus,
            Paint::Success => self.success,
            Paint::Fail => self.fail,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.viewfinder-window {
    background-color: #202020;
}
.viewfinder-surface {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
