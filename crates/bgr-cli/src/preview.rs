use crate::cmd::PreviewArgs;
use crate::config::Config;
use crate::utils::{print_json, read_document};
use anyhow::Result;
use bgr_markup::{preview_to_string, render_document, RenderOptions};

pub async fn run_preview_command(args: PreviewArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    let options = RenderOptions {
        show_hidden_chars: args.hidden || config.render.show_hidden_chars,
        show_char_width_rule: args.width_rule || config.render.show_char_width_rule,
        show_line_breaks: args.line_breaks || config.render.show_line_breaks,
    };

    let text = read_document(args.file.as_str()).await?;
    let lines = render_document(text.as_str(), &options, &config.tables);

    if args.json {
        return print_json(&lines);
    }

    println!("{}", preview_to_string(&lines));
    Ok(())
}
