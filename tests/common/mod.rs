#![allow(dead_code)]

use anyhow::Result;
use moon_shooter::display::{Canvas, Rect, TextureId};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear,
    Fill(Rect),
    Copy {
        texture: TextureId,
        src: Option<Rect>,
        dst: Rect,
        angle: f64,
    },
    Present,
}

/// Canvas that remembers every call instead of drawing.
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn copies(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Copy { .. }))
            .collect()
    }
}

impl Canvas for Recorder {
    fn clear(&mut self) -> Result<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.calls.push(Call::Fill(rect));
        Ok(())
    }

    fn copy(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect, angle: f64) -> Result<()> {
        self.calls.push(Call::Copy {
            texture,
            src,
            dst,
            angle,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

/// Canvas whose presents always fail, standing in for a broken terminal.
pub struct Broken;

impl Canvas for Broken {
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn fill_rect(&mut self, _rect: Rect) -> Result<()> {
        Ok(())
    }

    fn copy(&mut self, _texture: TextureId, _src: Option<Rect>, _dst: Rect, _angle: f64) -> Result<()> {
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        anyhow::bail!("could not present frame")
    }
}
