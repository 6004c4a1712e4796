pub mod font_options;
