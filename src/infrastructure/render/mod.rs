// グラフ描画

pub mod dot;

pub use dot::DotRenderer;
