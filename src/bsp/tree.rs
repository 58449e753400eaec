// src/bsp/tree.rs
//! Дерево двоичного разбиения пространства
//!
//! Узел владеет своим прямоугольником, опциональной комнатой (только у
//! листьев) и двумя детьми: их прямоугольники без зазора и нахлёста
//! замощают родительский. Конфигурация и ГСЧ не хранятся в узлах, а
//! передаются параметрами в каждую рекурсивную операцию; всё дерево
//! сбрасывается целиком при перезапуске генератора.

use crate::config::BspConfig;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Прямоугольная область в координатах сетки, полуоткрытая:
/// строки `y..y+h`, столбцы `x..x+w`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    #[must_use]
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Лежит ли `inner` строго внутри с полем не меньше одной клетки
    /// с каждой стороны
    #[must_use]
    pub fn contains_with_margin(&self, inner: &Rect) -> bool {
        inner.x > self.x
            && inner.y > self.y
            && inner.x + inner.w < self.x + self.w
            && inner.y + inner.h < self.y + self.h
    }
}

/// Узел дерева разбиения: ноль детей (лист) или ровно два
#[derive(Debug)]
pub struct Node {
    pub area: Rect,
    pub room: Option<Rect>,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    #[must_use]
    pub fn leaf(area: Rect) -> Self {
        Self {
            area,
            room: None,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Рекурсивно разбивает область узла.
    ///
    /// Ориентация выбирается случайно по `horiz_split_probability`, но
    /// вытянутость области имеет приоритет: слишком широкая область режется
    /// вертикально, слишком высокая — горизонтально. Допустимые смещения
    /// разреза — `[min, размер - min]`; пустой диапазон останавливает
    /// рекурсию, и узел остаётся листом.
    pub fn split(&mut self, config: &BspConfig, rng: &mut ChaCha8Rng) {
        let mut horizontal = rng.gen_bool(f64::from(config.horiz_split_probability));
        let w = self.area.w as f32;
        let h = self.area.h as f32;
        if w / h >= 1.0 + config.split_v_ratio {
            horizontal = false;
        } else if h / w > 1.0 + config.split_h_ratio {
            horizontal = true;
        }

        let (avail, min) = if horizontal {
            (self.area.h, config.min_height)
        } else {
            (self.area.w, config.min_width)
        };
        // avail - min <= min: разрез не оставил бы обеим половинам минимум
        if avail <= min * 2 {
            return;
        }
        let offset = rng.gen_range(min..=avail - min);

        let Rect { x, y, w, h } = self.area;
        let (first, second) = if horizontal {
            (
                Rect::new(x, y, w, offset),
                Rect::new(x, y + offset, w, h - offset),
            )
        } else {
            (
                Rect::new(x, y, offset, h),
                Rect::new(x + offset, y, w - offset, h),
            )
        };

        let mut left = Box::new(Node::leaf(first));
        let mut right = Box::new(Node::leaf(second));
        left.split(config, rng);
        right.split(config, rng);
        self.left = Some(left);
        self.right = Some(right);
    }

    /// Все листья дерева слева направо
    #[must_use]
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        if let Some(left) = self.left.as_deref() {
            left.collect_leaves(out);
        }
        if let Some(right) = self.right.as_deref() {
            right.collect_leaves(out);
        }
    }

    /// Комната-представитель поддерева для прокладки коридора.
    ///
    /// Если обе половины дают комнату, выбирается одна честной монеткой —
    /// без веса по размеру поддерева, это осознанное упрощение. Поддерево
    /// без единой комнаты возвращает `None` и молча остаётся в стороне.
    #[must_use]
    pub fn representative_room(&self, rng: &mut ChaCha8Rng) -> Option<Rect> {
        if let Some(room) = self.room {
            return Some(room);
        }
        let left = self
            .left
            .as_deref()
            .and_then(|n| n.representative_room(rng));
        let right = self
            .right
            .as_deref()
            .and_then(|n| n.representative_room(rng));
        match (left, right) {
            (None, None) => None,
            (Some(room), None) | (None, Some(room)) => Some(room),
            (Some(l), Some(r)) => Some(if rng.gen_bool(0.5) { l } else { r }),
        }
    }
}
