use crate::components::Component;
use crate::layout::Layout;

use super::Head;

/// A block whose content is a sequence of components and can therefore be
/// spread over several slides.
pub trait CompositeBlock {
    type Part: Component;

    fn components(&self) -> &[Self::Part];

    /// Render one slide holding `components` under `head`.
    fn slide_content(&self, components: &[Self::Part], head: &Head) -> String;

    fn height(&self, line_width: usize) -> usize {
        self.components()
            .iter()
            .map(|component| component.height(line_width))
            .sum()
    }

    /// The components grouped per slide.
    fn split(&self, layout: &Layout) -> Vec<&[Self::Part]> {
        paginate(self.components(), layout)
    }

    /// Rendered slide bodies, in order.
    fn slides(&self, head: &Head, layout: &Layout) -> Vec<String> {
        self.split(layout)
            .into_iter()
            .map(|components| self.slide_content(components, head))
            .collect()
    }
}

/// Greedy, single-pass pagination.
///
/// Components are appended to the current slide until the next one would push
/// its height over `layout.lines`; that component then opens a new slide. A
/// component taller than the budget sits alone on its own slide. The last
/// slide is always emitted, so the result is never empty, and the slices
/// concatenate back to `components`.
pub fn paginate<'a, C: Component>(components: &'a [C], layout: &Layout) -> Vec<&'a [C]> {
    let mut slides = Vec::new();
    let mut start = 0;
    let mut running = 0;

    for (i, component) in components.iter().enumerate() {
        let height = component.height(layout.line_width);
        if i > start && running + height > layout.lines {
            slides.push(&components[start..i]);
            start = i;
            running = 0;
        }
        running += height;
    }
    slides.push(&components[start..]);

    log::trace!(
        "paginated {} components into {} slides",
        components.len(),
        slides.len()
    );
    slides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CodeLine;
    use rstest::rstest;

    /// Lines whose heights at width 10 are the given values.
    fn lines_of_heights(heights: &[usize]) -> Vec<CodeLine> {
        heights
            .iter()
            .map(|h| CodeLine::new("x".repeat(h * 10)))
            .collect()
    }

    fn slide_heights(slides: &[&[CodeLine]]) -> Vec<Vec<usize>> {
        slides
            .iter()
            .map(|slide| slide.iter().map(|c| c.height(10)).collect())
            .collect()
    }

    #[test]
    fn test_five_twos_with_budget_six_make_two_slides() {
        let lines = lines_of_heights(&[2, 2, 2, 2, 2]);

        let slides = paginate(&lines, &Layout::new(10, 6));

        assert_eq!(slide_heights(&slides), vec![vec![2, 2, 2], vec![2, 2]]);
    }

    #[rstest]
    #[case(&[9], vec![vec![9]])]
    #[case(&[1, 9, 1], vec![vec![1], vec![9], vec![1]])]
    #[case(&[9, 9], vec![vec![9], vec![9]])]
    #[case(&[3, 3, 0, 1], vec![vec![3, 3, 0], vec![1]])]
    fn test_oversized_components_sit_alone(#[case] heights: &[usize], #[case] expected: Vec<Vec<usize>>) {
        let lines = lines_of_heights(heights);

        let slides = paginate(&lines, &Layout::new(10, 6));

        assert_eq!(slide_heights(&slides), expected);
    }

    #[test]
    fn test_empty_input_yields_one_empty_slide() {
        let lines: Vec<CodeLine> = Vec::new();

        let slides = paginate(&lines, &Layout::default());

        assert_eq!(slides.len(), 1);
        assert!(slides[0].is_empty());
    }

    #[test]
    fn test_concatenated_slides_reproduce_components() {
        let lines = lines_of_heights(&[1, 4, 2, 5, 1, 1, 7, 3, 0, 2]);

        for budget in 1..10 {
            let slides = paginate(&lines, &Layout::new(10, budget));
            let rejoined: Vec<CodeLine> = slides.concat();
            assert_eq!(rejoined, lines, "budget {budget}");
            assert!(slides.iter().all(|slide| !slide.is_empty()));
        }
    }
}
