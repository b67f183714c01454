use leptos::*;
use leptos_router::{use_params_map, A};

use crate::client::{self, EventoHistorial, PacienteRef};
use crate::components::common::{Cargando, ErrorBanner};
use crate::utils::fechas::formatear_fecha_hora;

fn color_evento(tipo: &str) -> &'static str {
    match tipo {
        "cita" => "bg-[#5fb3b0]",
        "nota" => "bg-amber-400",
        "imagen" => "bg-violet-400",
        "odontograma" => "bg-sky-400",
        _ => "bg-slate-300",
    }
}

fn etiqueta_evento(tipo: &str) -> &'static str {
    match tipo {
        "cita" => "Cita",
        "nota" => "Nota clínica",
        "imagen" => "Imagen",
        "odontograma" => "Odontograma",
        _ => "Evento",
    }
}

#[component]
pub fn PacienteHistorialPage() -> impl IntoView {
    let params = use_params_map();
    let paciente_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (paciente, set_paciente) = create_signal(Option::<PacienteRef>::None);
    let (eventos, set_eventos) = create_signal(Vec::<EventoHistorial>::new());
    let (cargando, set_cargando) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        let id = paciente_id();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            set_cargando.set(true);
            match client::historial_por_paciente(&id).await {
                Ok(r) => {
                    set_paciente.set(Some(r.paciente));
                    set_eventos.set(r.timeline);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_cargando.set(false);
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center gap-3">
                <A href=move || format!("/pacientes/{}", paciente_id()) class="text-sm text-[#5fb3b0] hover:underline">
                    "← Volver a la ficha"
                </A>
                <h1 class="text-xl font-bold text-slate-800">
                    "Historial"
                    {move || paciente.get().map(|p| format!(" · {}", p.nombre_completo())).unwrap_or_default()}
                </h1>
            </div>

            <ErrorBanner mensaje=error />

            {move || if cargando.get() {
                view! { <Cargando /> }.into_view()
            } else {
                let lista = eventos.get();
                if lista.is_empty() {
                    view! {
                        <p class="text-sm text-slate-400 text-center py-8">"Sin actividad registrada"</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="bg-white rounded-xl shadow p-6">
                            <div class="relative pl-6 border-l-2 border-slate-100 space-y-6">
                                {lista.into_iter().map(|ev| view! { <EventoFila evento=ev /> }).collect_view()}
                            </div>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn EventoFila(evento: EventoHistorial) -> impl IntoView {
    let punto = color_evento(&evento.tipo);
    let etiqueta = etiqueta_evento(&evento.tipo);
    let cuerpo = view! {
        <div>
            <div class="flex items-center gap-2">
                <span class="text-xs font-medium text-slate-400 uppercase tracking-wide">{etiqueta}</span>
                <span class="text-xs text-slate-400">{formatear_fecha_hora(&evento.fecha)}</span>
            </div>
            <p class="text-sm text-slate-700 mt-0.5">{evento.titulo.clone()}</p>
            {evento.detalle.clone().map(|d| view! {
                <p class="text-xs text-slate-500 mt-0.5">{d}</p>
            })}
        </div>
    };

    view! {
        <div class="relative">
            <span class=format!("absolute -left-[31px] top-1 w-3 h-3 rounded-full ring-4 ring-white {punto}")></span>
            {if evento.tipo == "odontograma" {
                view! {
                    <A href=format!("/odontograma/{}", evento.id) class="block hover:opacity-80">
                        {cuerpo}
                    </A>
                }.into_view()
            } else if evento.tipo == "cita" {
                view! {
                    <A href=format!("/citas/{}", evento.id) class="block hover:opacity-80">
                        {cuerpo}
                    </A>
                }.into_view()
            } else {
                cuerpo.into_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipos_conocidos_tienen_color_propio() {
        assert_ne!(color_evento("cita"), color_evento("nota"));
        assert_eq!(color_evento("desconocido"), "bg-slate-300");
        assert_eq!(etiqueta_evento("imagen"), "Imagen");
    }
}
